pub mod error;
pub mod validated;

pub use error::SettingsError;
pub use validated::{DEFAULT_MAX_DEPTH, FilterSettings, FilterSettingsBuilder};
