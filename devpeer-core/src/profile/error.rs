//! Error types for profile lookups.

use thiserror::Error;

/// Errors that can occur while checking a handle.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The handle was empty after trimming.
    #[error("Handle must not be empty")]
    EmptyHandle,

    /// The configured API base URL cannot carry a handle path.
    #[error("Invalid profile API URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("Profile lookup failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status that is neither success nor 404.
    #[error("Profile service returned status {0}")]
    UnexpectedStatus(u16),
}

/// Result type for profile lookups.
pub type ProfileResult<T> = Result<T, ProfileError>;
