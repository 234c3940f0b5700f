use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Failed to encode scan request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode scan request: {0}")]
    Decode(#[source] serde_json::Error),
}
