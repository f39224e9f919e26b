//! Error types for spawned bootstrap runs.

use thiserror::Error;

/// Errors surfaced when joining a spawned bootstrap.
///
/// A run itself never fails; every problem becomes a
/// [`BootstrapOutcome`](super::BootstrapOutcome). Only the task hosting it can.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The task panicked or was aborted by the runtime.
    #[error("Bootstrap task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for bootstrap task operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
