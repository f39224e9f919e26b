//! Entry point used by the platform layer.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::bootstrap::{BootstrapTask, BootstrapWorkflow};
use crate::config::{ConfigError, DevPeerConfig};
use crate::directory::community::demo_directory;
use crate::directory::{DirectoryError, HttpDirectoryClient, UserDirectory};
use crate::location::LocationProvider;
use crate::navigation::{self, Route};
use crate::profile::{GitHubProfileClient, ProfileError, ProfileLookup};
use crate::session::{SessionContext, SessionError, SessionResult, SqliteSessionStore};
use crate::signup::{SignUpFlow, SignUpOutcome};

/// File name of the session database inside the data directory.
pub const SESSION_DB_FILE: &str = "session.db";

/// Error type for opening [`DevPeerCore`].
#[derive(Error, Debug)]
pub enum CoreError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session store could not be opened.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The profile client could not be built.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The directory client could not be built.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type alias for [`DevPeerCore`] construction.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core interface for DevPeer.
///
/// Owns the configuration, the session, and the two remote services. Every
/// screen goes through it:
///
/// - sign-up: [`signup_on_mount`](Self::signup_on_mount),
///   [`submit_signup`](Self::submit_signup)
/// - map: [`bootstrap`](Self::bootstrap), [`spawn_bootstrap`](Self::spawn_bootstrap),
///   [`logout`](Self::logout)
/// - profile: [`profile_route`](Self::profile_route), [`profile_url`](Self::profile_url)
#[derive(Clone)]
pub struct DevPeerCore {
    config: DevPeerConfig,
    session: SessionContext,
    signup: SignUpFlow,
    directory: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for DevPeerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevPeerCore")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl DevPeerCore {
    /// Opens the core with the session database under `data_dir`.
    ///
    /// With `directory.use_demo_users` set, the map is served by an
    /// in-memory directory seeded with the demo community instead of the
    /// REST backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the session
    /// database cannot be opened, or an HTTP client cannot be built.
    pub fn open(config: DevPeerConfig, data_dir: &Path) -> CoreResult<Self> {
        config.validate()?;

        let store = SqliteSessionStore::new(&data_dir.join(SESSION_DB_FILE))?;
        let profiles =
            GitHubProfileClient::new(&config.profile.api_base_url, &config.profile.user_agent)?;

        let directory: Arc<dyn UserDirectory> = if config.directory.use_demo_users {
            warn!("Using the demo community instead of the directory backend");
            Arc::new(demo_directory(&config.profile.web_base_url))
        } else {
            Arc::new(HttpDirectoryClient::new(&config.directory.base_url)?)
        };

        info!(
            "DevPeer core opened (directory {}, data {})",
            config.directory.base_url,
            data_dir.display()
        );

        Ok(Self::with_components(
            config,
            SessionContext::new(Arc::new(store)),
            Arc::new(profiles),
            directory,
        ))
    }

    /// Assembles the core from ready-made parts.
    #[must_use]
    pub fn with_components(
        config: DevPeerConfig,
        session: SessionContext,
        profiles: Arc<dyn ProfileLookup>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            config,
            session,
            signup: SignUpFlow::new(profiles),
            directory,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DevPeerConfig {
        &self.config
    }

    /// The device session.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// See [`SignUpFlow::on_mount`].
    #[must_use]
    pub fn signup_on_mount(&self) -> Option<Route> {
        self.signup.on_mount(&self.session)
    }

    /// See [`SignUpFlow::submit`].
    ///
    /// # Errors
    ///
    /// Returns an error if a confirmed handle could not be stored.
    pub async fn submit_signup(&self, raw: &str) -> SessionResult<SignUpOutcome> {
        self.signup.submit(&self.session, raw).await
    }

    /// Prepares a bootstrap of the map screen using `location`.
    #[must_use]
    pub fn bootstrap(&self, location: Arc<dyn LocationProvider>) -> BootstrapWorkflow {
        BootstrapWorkflow::new(self.session.clone(), location, Arc::clone(&self.directory))
            .with_web_base_url(&self.config.profile.web_base_url)
            .with_region_delta(self.config.map.region_delta)
    }

    /// Starts a bootstrap on the current runtime; it is cancelled when the
    /// returned task is dropped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn_bootstrap(&self, location: Arc<dyn LocationProvider>) -> BootstrapTask {
        BootstrapTask::spawn(self.bootstrap(location))
    }

    /// Signs out and returns the screen to show.
    ///
    /// The directory record is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn logout(&self) -> SessionResult<Route> {
        self.session.sign_out()?;
        Ok(Route::SignUp)
    }

    /// Route to the profile page for `handle`.
    #[must_use]
    pub fn profile_route(&self, handle: &str) -> Route {
        Route::Profile {
            handle: handle.to_string(),
        }
    }

    /// URL of the public profile page for `handle`.
    #[must_use]
    pub fn profile_url(&self, handle: &str) -> String {
        navigation::profile_url(&self.config.profile.web_base_url, handle)
    }
}
