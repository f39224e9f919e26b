//! Error types for directory operations.

use thiserror::Error;

/// Errors that can occur while talking to the user directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request never produced a response.
    #[error("Directory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The directory answered with a non-success status.
    #[error("Directory returned status {status} for {url}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The configured base URL cannot be used.
    #[error("Invalid directory URL: {0}")]
    InvalidUrl(String),

    /// The response body was not the expected JSON.
    #[error("Failed to decode directory response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
