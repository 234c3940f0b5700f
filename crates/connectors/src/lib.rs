pub mod bigtable;
pub mod error;
