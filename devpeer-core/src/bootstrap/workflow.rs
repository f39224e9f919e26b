//! The bootstrap run.

use std::future::Future;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::state::{BootstrapOutcome, BootstrapReport, BootstrapState, MapSnapshot};
use crate::config::{DEFAULT_PROFILE_WEB_URL, DEFAULT_REGION_DELTA};
use crate::directory::{UserDirectory, UserRecord};
use crate::location::{LocationProvider, MapRegion};
use crate::navigation::Alert;
use crate::session::SessionContext;

/// One bootstrap of the map screen.
///
/// Built per mount and consumed by [`run`](Self::run) or
/// [`run_until_cancelled`](Self::run_until_cancelled). The profile service is
/// never consulted: a stored session is trusted without re-validation.
///
/// # Example
///
/// ```ignore
/// let workflow = BootstrapWorkflow::new(session, Arc::new(provider), directory);
/// let report = workflow.run().await;
/// match report.outcome {
///     BootstrapOutcome::RedirectSignUp => navigate(Route::SignUp),
///     BootstrapOutcome::Ready(snapshot) => render(snapshot),
///     other => show(other.alert()),
/// }
/// ```
pub struct BootstrapWorkflow {
    session: SessionContext,
    location: Arc<dyn LocationProvider>,
    directory: Arc<dyn UserDirectory>,
    web_base_url: String,
    region_delta: f64,
    state: watch::Sender<BootstrapState>,
    trace: Vec<BootstrapState>,
}

impl BootstrapWorkflow {
    /// Creates a workflow over the given collaborators.
    #[must_use]
    pub fn new(
        session: SessionContext,
        location: Arc<dyn LocationProvider>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let (state, _) = watch::channel(BootstrapState::Start);
        Self {
            session,
            location,
            directory,
            web_base_url: DEFAULT_PROFILE_WEB_URL.to_string(),
            region_delta: DEFAULT_REGION_DELTA,
            state,
            trace: Vec::new(),
        }
    }

    /// Sets the site avatars are derived from.
    #[must_use]
    pub fn with_web_base_url(mut self, web_base_url: &str) -> Self {
        self.web_base_url = web_base_url.to_string();
        self
    }

    /// Sets the span of the initial map region.
    #[must_use]
    pub const fn with_region_delta(mut self, region_delta: f64) -> Self {
        self.region_delta = region_delta;
        self
    }

    /// Subscribes to state changes, for a loading indicator.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<BootstrapState> {
        self.state.subscribe()
    }

    /// Runs to a terminal state.
    pub async fn run(self) -> BootstrapReport {
        self.run_until_cancelled(CancellationToken::new()).await
    }

    /// Runs to a terminal state, stopping early once `token` is cancelled.
    ///
    /// Cancellation is observed at every suspension point; an in-flight
    /// request is dropped and no later collaborator is called.
    pub async fn run_until_cancelled(mut self, token: CancellationToken) -> BootstrapReport {
        let outcome = self.drive(&token).await;
        BootstrapReport {
            outcome,
            trace: self.trace,
        }
    }

    fn enter(&mut self, state: BootstrapState) {
        debug!("Bootstrap: {state:?}");
        self.trace.push(state);
        self.state.send_replace(state);
    }

    fn finish(&mut self, outcome: BootstrapOutcome) -> BootstrapOutcome {
        self.enter(outcome.state());
        outcome
    }

    async fn drive(&mut self, token: &CancellationToken) -> BootstrapOutcome {
        self.enter(BootstrapState::Start);
        if token.is_cancelled() {
            return self.finish(BootstrapOutcome::Cancelled);
        }

        self.enter(BootstrapState::CheckingSession);
        let handle = match self.session.current_handle() {
            Ok(Some(handle)) => handle,
            Ok(None) => return self.finish(BootstrapOutcome::RedirectSignUp),
            Err(e) => {
                warn!("Session store unreadable, treating as signed out: {e}");
                return self.finish(BootstrapOutcome::RedirectSignUp);
            }
        };

        self.enter(BootstrapState::CheckingPermission);
        let location = Arc::clone(&self.location);
        let Some(permission) = until_cancelled(token, location.request_permission()).await else {
            return self.finish(BootstrapOutcome::Cancelled);
        };
        if !permission.is_granted() {
            warn!("Location permission denied for {handle}");
            return self.finish(BootstrapOutcome::PermissionDenied {
                alert: Alert::permission_denied(),
            });
        }

        self.enter(BootstrapState::FetchingLocation);
        let Some(reading) = until_cancelled(token, location.current_coordinate()).await else {
            return self.finish(BootstrapOutcome::Cancelled);
        };
        let coordinate = match reading {
            Ok(coordinate) => coordinate,
            Err(e) => {
                warn!("Unable to fetch location: {e}");
                return self.finish(BootstrapOutcome::LocationError {
                    alert: Alert::location_unavailable(),
                });
            }
        };

        self.enter(BootstrapState::Registering);
        let current_user = UserRecord::new(&handle, coordinate, &self.web_base_url);
        let directory = Arc::clone(&self.directory);

        let Some(registration) = until_cancelled(token, directory.register(&current_user)).await
        else {
            return self.finish(BootstrapOutcome::Cancelled);
        };

        let Some(listing) = until_cancelled(token, directory.fetch_all()).await else {
            return self.finish(BootstrapOutcome::Cancelled);
        };

        match listing {
            Ok(users) => {
                info!(
                    "Map ready for {handle}: {} user(s), registration {registration:?}",
                    users.len()
                );
                self.finish(BootstrapOutcome::Ready(MapSnapshot {
                    region: MapRegion::around(coordinate, self.region_delta),
                    current_user,
                    users,
                    registration,
                }))
            }
            Err(e) => {
                error!("Failed to fetch users: {e}");
                self.finish(BootstrapOutcome::FetchFailed {
                    current_user,
                    alert: Alert::users_unavailable(),
                })
            }
        }
    }
}

/// Awaits `fut` unless `token` is cancelled first.
async fn until_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        output = fut => Some(output),
    }
}
