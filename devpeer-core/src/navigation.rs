//! Screens and user-facing alerts.
//!
//! The platform renders three screens. Only the profile screen takes a
//! parameter: the handle whose public page it shows.

use serde::{Deserialize, Serialize};

/// A screen the app can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Handle entry.
    SignUp,
    /// Map of nearby developers.
    Map,
    /// Web view of a public profile.
    Profile {
        /// Handle of the profile to show.
        handle: String,
    },
}

impl Route {
    /// Screen name as registered with the platform navigator.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SignUp => "SignUp",
            Self::Map => "Map",
            Self::Profile { .. } => "Profile",
        }
    }
}

/// Public profile page for `handle`.
///
/// # Examples
///
/// ```
/// use devpeer_core::navigation::profile_url;
///
/// assert_eq!(profile_url("https://github.com", "torvalds"), "https://github.com/torvalds");
/// ```
#[must_use]
pub fn profile_url(web_base_url: &str, handle: &str) -> String {
    format!("{}/{handle}", web_base_url.trim_end_matches('/'))
}

/// A modal alert for the platform to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert title.
    pub title: String,
    /// Alert body.
    pub message: String,
}

impl Alert {
    /// Creates an alert.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Shown when location permission is refused.
    #[must_use]
    pub fn permission_denied() -> Self {
        Self::new(
            "Permission denied",
            "Location permission is required to show your location on the map.",
        )
    }

    /// Shown when no location reading could be taken.
    #[must_use]
    pub fn location_unavailable() -> Self {
        Self::new("Error", "Unable to fetch location.")
    }

    /// Shown when the directory could not be listed.
    #[must_use]
    pub fn users_unavailable() -> Self {
        Self::new("Error", "Unable to load nearby developers.")
    }

    /// Shown when a sign-up handle is rejected, whatever the reason.
    #[must_use]
    pub fn invalid_username() -> Self {
        Self::new("Invalid Username", "There is no such username on GitHub.")
    }
}
