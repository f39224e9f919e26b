//! API bridging layer that exposes devpeer-core functionality.

use std::path::Path;
use std::sync::Arc;

use devpeer_core::bootstrap::{BootstrapOutcome, CancellationToken};
use devpeer_core::directory::UserRecord;
use devpeer_core::navigation::{Alert, Route};
use devpeer_core::signup::SignUpOutcome;
use devpeer_core::{DevPeerConfig, DevPeerCore};
use flutter_rust_bridge::{frb, DartFnFuture};
use log::warn;

use crate::location::DartLocation;
use crate::logger;

/// Core interface for DevPeer (wrapper around devpeer-core).
#[derive(Debug, Clone)]
#[frb(opaque)]
pub struct DevPeerApp {
    inner: DevPeerCore,
}

impl DevPeerApp {
    /// Loads configuration, starts logging, and opens the session store.
    ///
    /// `config_path` may point at a missing file; defaults and `DEVPEER_*`
    /// environment variables are used then.
    pub fn open(config_path: Option<String>, data_dir: String) -> Result<Self, String> {
        let config = match config_path {
            Some(path) => DevPeerConfig::load(Path::new(&path)).map_err(|e| e.to_string())?,
            None => {
                let mut config = DevPeerConfig::default();
                config.apply_env_overrides();
                config
            }
        };

        if let Err(e) = logger::initialize(*config.logging.level) {
            warn!("{e}");
        }

        let inner = DevPeerCore::open(config, Path::new(&data_dir)).map_err(|e| e.to_string())?;
        Ok(Self { inner })
    }

    /// Route name to jump to when the sign-up screen mounts, if any.
    #[must_use]
    #[frb(sync)]
    pub fn signup_on_mount(&self) -> Option<String> {
        self.inner
            .signup_on_mount()
            .map(|route| route.name().to_string())
    }

    /// Submits the sign-up form.
    pub async fn submit_signup(&self, handle: String) -> Result<SignUpView, String> {
        let outcome = self
            .inner
            .submit_signup(&handle)
            .await
            .map_err(|e| e.to_string())?;
        Ok(SignUpView::from(outcome))
    }

    /// Prepares a map load that can be cancelled from Dart.
    #[must_use]
    #[frb(sync)]
    pub fn map_load(&self) -> MapLoad {
        MapLoad {
            core: self.inner.clone(),
            token: CancellationToken::new(),
        }
    }

    /// Signs out and returns the route name to show.
    #[frb(sync)]
    pub fn logout(&self) -> Result<String, String> {
        self.inner
            .logout()
            .map(|route| route.name().to_string())
            .map_err(|e| e.to_string())
    }

    /// URL of the public profile page for `handle`.
    #[must_use]
    #[frb(sync)]
    pub fn profile_url(&self, handle: String) -> String {
        self.inner.profile_url(&handle)
    }
}

/// One bootstrap of the map screen (FFI wrapper).
///
/// Dart calls [`cancel`](Self::cancel) from `dispose` so a late result is
/// dropped.
#[derive(Debug, Clone)]
#[frb(opaque)]
pub struct MapLoad {
    core: DevPeerCore,
    token: CancellationToken,
}

impl MapLoad {
    /// Runs the bootstrap, calling back into Dart for the platform steps.
    ///
    /// Call order:
    ///
    /// 1. The session is checked first. Without one the run redirects to
    ///    sign-up and neither callback is invoked.
    /// 2. `request_permission` shows the OS prompt and resolves to whether
    ///    foreground location was granted.
    /// 3. `current_coordinate` is invoked only after a grant. `None` counts
    ///    as a failed reading.
    ///
    /// After [`cancel`](Self::cancel) no further callback is invoked.
    pub async fn run(
        &self,
        request_permission: impl Fn() -> DartFnFuture<bool> + Send + Sync + 'static,
        current_coordinate: impl Fn() -> DartFnFuture<Option<CoordinateView>>
            + Send
            + Sync
            + 'static,
    ) -> MapView {
        let location = DartLocation::new(request_permission, current_coordinate);
        let report = self
            .core
            .bootstrap(Arc::new(location))
            .run_until_cancelled(self.token.clone())
            .await;
        MapView::from(report.outcome)
    }

    /// Cancels the run.
    #[frb(sync)]
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// A position reported by the platform.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateView {
    pub latitude: f64,
    pub longitude: f64,
}

/// Alert text for a modal dialog.
#[derive(Debug, Clone)]
pub struct AlertView {
    pub title: String,
    pub message: String,
}

impl From<Alert> for AlertView {
    fn from(alert: Alert) -> Self {
        Self {
            title: alert.title,
            message: alert.message,
        }
    }
}

/// Result of the sign-up form.
#[derive(Debug, Clone)]
pub struct SignUpView {
    /// Route name to replace the form with, on success.
    pub route: Option<String>,
    /// Alert to show, on rejection.
    pub alert: Option<AlertView>,
}

impl From<SignUpOutcome> for SignUpView {
    fn from(outcome: SignUpOutcome) -> Self {
        match outcome {
            SignUpOutcome::Navigate(route) => Self {
                route: Some(route.name().to_string()),
                alert: None,
            },
            SignUpOutcome::Rejected { alert, .. } => Self {
                route: None,
                alert: Some(alert.into()),
            },
        }
    }
}

/// A map marker.
#[derive(Debug, Clone)]
pub struct UserView {
    pub handle: String,
    pub latitude: f64,
    pub longitude: f64,
    pub avatar_url: String,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            handle: record.handle,
            latitude: record.latitude,
            longitude: record.longitude,
            avatar_url: record.avatar_url,
        }
    }
}

/// Initial viewport.
#[derive(Debug, Clone, Copy)]
pub struct RegionView {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Everything the map screen needs after a bootstrap.
#[derive(Debug, Clone)]
pub struct MapView {
    /// Terminal state name, e.g. `Ready` or `PermissionDenied`.
    pub state: String,
    /// Route name to replace the map with, if any.
    pub redirect: Option<String>,
    pub alert: Option<AlertView>,
    pub current_user: Option<UserView>,
    pub users: Vec<UserView>,
    pub region: Option<RegionView>,
}

impl From<BootstrapOutcome> for MapView {
    fn from(outcome: BootstrapOutcome) -> Self {
        let mut view = Self {
            state: format!("{:?}", outcome.state()),
            redirect: outcome.redirect().map(|route: Route| route.name().to_string()),
            alert: outcome.alert().cloned().map(AlertView::from),
            current_user: None,
            users: Vec::new(),
            region: None,
        };

        match outcome {
            BootstrapOutcome::Ready(snapshot) => {
                view.region = Some(RegionView {
                    latitude: snapshot.region.latitude,
                    longitude: snapshot.region.longitude,
                    latitude_delta: snapshot.region.latitude_delta,
                    longitude_delta: snapshot.region.longitude_delta,
                });
                view.current_user = Some(snapshot.current_user.into());
                view.users = snapshot.users.into_iter().map(UserView::from).collect();
            }
            BootstrapOutcome::FetchFailed { current_user, .. } => {
                view.current_user = Some(current_user.into());
            }
            _ => {}
        }

        view
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use devpeer_core::bootstrap::MapSnapshot;
    use devpeer_core::directory::RegistrationOutcome;
    use devpeer_core::location::{Coordinate, MapRegion};
    use devpeer_core::session::{MemorySessionStore, SessionContext};
    use devpeer_core::testing::{RecordingDirectory, StaticProfiles};

    fn answer<T: Send + 'static>(value: T) -> DartFnFuture<T> {
        Box::pin(async move { value })
    }

    /// Counts how often each Dart callback was invoked.
    #[derive(Clone, Default)]
    struct Callbacks {
        prompts: Arc<AtomicUsize>,
        readings: Arc<AtomicUsize>,
    }

    impl Callbacks {
        fn permission(&self, granted: bool) -> impl Fn() -> DartFnFuture<bool> + Send + Sync {
            let prompts = Arc::clone(&self.prompts);
            move || {
                prompts.fetch_add(1, Ordering::SeqCst);
                answer(granted)
            }
        }

        fn reading(
            &self,
            latitude: f64,
            longitude: f64,
        ) -> impl Fn() -> DartFnFuture<Option<CoordinateView>> + Send + Sync {
            let readings = Arc::clone(&self.readings);
            move || {
                readings.fetch_add(1, Ordering::SeqCst);
                answer(Some(CoordinateView {
                    latitude,
                    longitude,
                }))
            }
        }

        fn prompts(&self) -> usize {
            self.prompts.load(Ordering::SeqCst)
        }

        fn readings(&self) -> usize {
            self.readings.load(Ordering::SeqCst)
        }
    }

    fn app(store: MemorySessionStore, directory: Arc<RecordingDirectory>) -> DevPeerApp {
        DevPeerApp {
            inner: DevPeerCore::with_components(
                DevPeerConfig::default(),
                SessionContext::new(Arc::new(store)),
                Arc::new(StaticProfiles::default()),
                directory,
            ),
        }
    }

    #[tokio::test]
    async fn signed_out_run_never_calls_dart() {
        let directory = Arc::new(RecordingDirectory::new());
        let app = app(MemorySessionStore::new(), directory.clone());
        let callbacks = Callbacks::default();

        let view = app
            .map_load()
            .run(callbacks.permission(true), callbacks.reading(37.0, -122.0))
            .await;

        assert_eq!(view.redirect.as_deref(), Some("SignUp"));
        assert_eq!(callbacks.prompts(), 0);
        assert_eq!(callbacks.readings(), 0);
        assert_eq!(directory.total_calls(), 0);
    }

    #[tokio::test]
    async fn denied_permission_skips_reading() {
        let directory = Arc::new(RecordingDirectory::new());
        let app = app(MemorySessionStore::signed_in("alice"), directory.clone());
        let callbacks = Callbacks::default();

        let view = app
            .map_load()
            .run(callbacks.permission(false), callbacks.reading(37.0, -122.0))
            .await;

        assert_eq!(view.state, "PermissionDenied");
        assert_eq!(view.alert.unwrap().title, "Permission denied");
        assert_eq!(callbacks.prompts(), 1);
        assert_eq!(callbacks.readings(), 0);
        assert_eq!(directory.total_calls(), 0);
    }

    #[tokio::test]
    async fn granted_run_prompts_then_reads_once() {
        let directory = Arc::new(RecordingDirectory::new());
        let app = app(MemorySessionStore::signed_in("alice"), directory.clone());
        let callbacks = Callbacks::default();

        let view = app
            .map_load()
            .run(callbacks.permission(true), callbacks.reading(37.0, -122.0))
            .await;

        assert_eq!(view.state, "Ready");
        assert_eq!(view.current_user.unwrap().handle, "alice");
        assert_eq!(callbacks.prompts(), 1);
        assert_eq!(callbacks.readings(), 1);
        assert_eq!(directory.create_calls(), 1);
    }

    #[tokio::test]
    async fn cancelled_load_never_calls_dart() {
        let app = app(
            MemorySessionStore::signed_in("alice"),
            Arc::new(RecordingDirectory::new()),
        );
        let callbacks = Callbacks::default();
        let load = app.map_load();
        load.cancel();

        let view = load
            .run(callbacks.permission(true), callbacks.reading(37.0, -122.0))
            .await;

        assert_eq!(view.state, "Cancelled");
        assert_eq!(callbacks.prompts(), 0);
    }

    #[test]
    fn rejected_signup_carries_alert_only() {
        let view = SignUpView::from(SignUpOutcome::Rejected {
            reason: devpeer_core::signup::SignUpRejection::NotFound,
            alert: Alert::invalid_username(),
        });
        assert!(view.route.is_none());
        assert_eq!(view.alert.unwrap().title, "Invalid Username");
    }

    #[test]
    fn redirect_outcome_maps_to_route_name() {
        let view = MapView::from(BootstrapOutcome::RedirectSignUp);
        assert_eq!(view.state, "RedirectSignUp");
        assert_eq!(view.redirect.as_deref(), Some("SignUp"));
        assert!(view.users.is_empty());
    }

    #[test]
    fn ready_outcome_carries_markers() {
        let here = Coordinate::new(37.0, -122.0).unwrap();
        let me = UserRecord::new("alice", here, "https://github.com");
        let view = MapView::from(BootstrapOutcome::Ready(MapSnapshot {
            current_user: me.clone(),
            users: vec![me],
            region: MapRegion::around(here, 0.25),
            registration: RegistrationOutcome::Created,
        }));

        assert_eq!(view.state, "Ready");
        assert_eq!(view.users.len(), 1);
        assert_eq!(view.users[0].avatar_url, "https://github.com/alice.png");
        assert_eq!(view.region.unwrap().latitude_delta, 0.25);
    }
}
