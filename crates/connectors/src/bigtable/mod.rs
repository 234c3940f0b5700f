pub mod filter;
pub mod regex;
pub mod request;
