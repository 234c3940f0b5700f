use thiserror::Error;

/// Errors raised when loading or validating filter settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A setting holds a value outside its allowed range.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },

    /// The settings document is not valid JSON for `FilterSettings`.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}
