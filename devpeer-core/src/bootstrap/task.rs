//! Bootstrap runs tied to the lifetime of the map screen.

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::error::BootstrapResult;
use super::state::{BootstrapReport, BootstrapState};
use super::workflow::BootstrapWorkflow;

/// A bootstrap running on the tokio runtime.
///
/// Dropping the task cancels the run, so a map screen that unmounts mid-way
/// never receives a late result.
#[derive(Debug)]
pub struct BootstrapTask {
    handle: JoinHandle<BootstrapReport>,
    token: CancellationToken,
    _guard: DropGuard,
    progress: watch::Receiver<BootstrapState>,
}

impl BootstrapTask {
    /// Spawns `workflow` onto the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(workflow: BootstrapWorkflow) -> Self {
        let token = CancellationToken::new();
        let progress = workflow.progress();
        let handle = tokio::spawn(workflow.run_until_cancelled(token.clone()));

        Self {
            handle,
            _guard: token.clone().drop_guard(),
            token,
            progress,
        }
    }

    /// Requests cancellation. The run stops at its next suspension point.
    pub fn cancel(&self) {
        debug!("Cancelling bootstrap");
        self.token.cancel();
    }

    /// Returns whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Subscribes to state changes of the run.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<BootstrapState> {
        self.progress.clone()
    }

    /// Waits for the run to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the run panicked.
    pub async fn join(self) -> BootstrapResult<BootstrapReport> {
        Ok(self.handle.await?)
    }
}
