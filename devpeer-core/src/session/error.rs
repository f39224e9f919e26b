//! Error types for session storage.

use thiserror::Error;

/// Error type for session store operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for session operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;
