pub mod error;
pub mod filter;
