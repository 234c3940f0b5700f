pub mod status;

pub use status::{COMPOSITE_NOT_SUPPORTED, SupportStatus};
