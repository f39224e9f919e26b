//! Bootstrap states and results.

use serde::Serialize;

use crate::directory::{RegistrationOutcome, UserRecord};
use crate::location::MapRegion;
use crate::navigation::{Alert, Route};

/// A step of the bootstrap state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BootstrapState {
    /// Not started.
    Start,
    /// Reading the session store.
    CheckingSession,
    /// No session; the sign-up screen takes over. Terminal.
    RedirectSignUp,
    /// Waiting on the permission prompt.
    CheckingPermission,
    /// Permission refused. Terminal.
    PermissionDenied,
    /// Waiting on a location reading.
    FetchingLocation,
    /// No usable reading. Terminal.
    LocationError,
    /// Registering the current user, then listing the directory.
    Registering,
    /// Users loaded. Terminal.
    Ready,
    /// Listing the directory failed. Terminal.
    FetchFailed,
    /// The run was cancelled before finishing. Terminal.
    Cancelled,
}

impl BootstrapState {
    /// Returns whether the machine stops in this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::RedirectSignUp
                | Self::PermissionDenied
                | Self::LocationError
                | Self::Ready
                | Self::FetchFailed
                | Self::Cancelled
        )
    }
}

/// Everything the map needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    /// The signed-in user at the position just read.
    pub current_user: UserRecord,
    /// Every user the directory returned, in backend order.
    pub users: Vec<UserRecord>,
    /// Initial viewport, centred on the current user.
    pub region: MapRegion,
    /// What happened when registering the current user.
    pub registration: RegistrationOutcome,
}

impl MapSnapshot {
    /// Users other than the signed-in one.
    pub fn others(&self) -> impl Iterator<Item = &UserRecord> {
        self.users
            .iter()
            .filter(move |u| u.handle != self.current_user.handle)
    }
}

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    /// Nobody is signed in.
    RedirectSignUp,
    /// Location permission was refused.
    PermissionDenied {
        /// Alert to show.
        alert: Alert,
    },
    /// No location reading could be taken.
    LocationError {
        /// Alert to show.
        alert: Alert,
    },
    /// Registration was attempted but the directory could not be listed.
    /// The map renders empty.
    FetchFailed {
        /// The signed-in user at the position just read.
        current_user: UserRecord,
        /// Alert to show.
        alert: Alert,
    },
    /// The map can be drawn.
    Ready(MapSnapshot),
    /// The run was cancelled.
    Cancelled,
}

impl BootstrapOutcome {
    /// The terminal state this outcome corresponds to.
    #[must_use]
    pub const fn state(&self) -> BootstrapState {
        match self {
            Self::RedirectSignUp => BootstrapState::RedirectSignUp,
            Self::PermissionDenied { .. } => BootstrapState::PermissionDenied,
            Self::LocationError { .. } => BootstrapState::LocationError,
            Self::FetchFailed { .. } => BootstrapState::FetchFailed,
            Self::Ready(_) => BootstrapState::Ready,
            Self::Cancelled => BootstrapState::Cancelled,
        }
    }

    /// The alert to show, if any.
    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        match self {
            Self::PermissionDenied { alert }
            | Self::LocationError { alert }
            | Self::FetchFailed { alert, .. } => Some(alert),
            Self::RedirectSignUp | Self::Ready(_) | Self::Cancelled => None,
        }
    }

    /// The screen to replace the map with, if any.
    #[must_use]
    pub const fn redirect(&self) -> Option<Route> {
        match self {
            Self::RedirectSignUp => Some(Route::SignUp),
            _ => None,
        }
    }

    /// The loaded map, if the run reached `Ready`.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&MapSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Result of one bootstrap run.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    /// How the run ended.
    pub outcome: BootstrapOutcome,
    /// States entered, in order, starting with `Start`.
    pub trace: Vec<BootstrapState>,
}
