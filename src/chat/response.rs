//! Chat error types

use thiserror::Error;

/// Error types for chat operations
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Failed to decode stream event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}
