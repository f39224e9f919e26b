//! Sign-up screen logic.
//!
//! A handle is accepted only after the public profile service confirms it.
//! The user sees one alert whatever went wrong; [`SignUpRejection`] keeps the
//! underlying reason for logs and tests.

use std::sync::Arc;

use log::{info, warn};

use crate::navigation::{Alert, Route};
use crate::profile::{normalize_handle, HandleStatus, ProfileLookup};
use crate::session::{SessionContext, SessionResult};

/// Why a submitted handle was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpRejection {
    /// Nothing but whitespace was entered.
    Empty,
    /// The profile service answered 404.
    NotFound,
    /// The lookup failed in transport or with an unexpected status.
    LookupFailed(String),
}

/// Result of submitting the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The handle was stored; replace the screen with `Route`.
    Navigate(Route),
    /// The handle was refused; stay on the form and show `alert`.
    Rejected {
        /// Underlying reason.
        reason: SignUpRejection,
        /// Alert to show.
        alert: Alert,
    },
}

impl SignUpOutcome {
    fn rejected(reason: SignUpRejection) -> Self {
        Self::Rejected {
            reason,
            alert: Alert::invalid_username(),
        }
    }
}

/// The sign-up form.
#[derive(Clone)]
pub struct SignUpFlow {
    profiles: Arc<dyn ProfileLookup>,
}

impl std::fmt::Debug for SignUpFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpFlow").finish_non_exhaustive()
    }
}

impl SignUpFlow {
    /// Creates the flow over a profile service.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileLookup>) -> Self {
        Self { profiles }
    }

    /// Where to go when the form first appears.
    ///
    /// Returns [`Route::Map`] if a handle is already stored. An unreadable
    /// store is logged and treated as signed out.
    #[must_use]
    pub fn on_mount(&self, session: &SessionContext) -> Option<Route> {
        match session.is_signed_in() {
            Ok(true) => Some(Route::Map),
            Ok(false) => None,
            Err(e) => {
                warn!("Session store unreadable on sign-up: {e}");
                None
            }
        }
    }

    /// Validates `raw` and signs in on success.
    ///
    /// Only a confirmed handle is stored. The profile service is called at
    /// most once; a blank handle is refused without calling it.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle was confirmed but could not be stored.
    pub async fn submit(
        &self,
        session: &SessionContext,
        raw: &str,
    ) -> SessionResult<SignUpOutcome> {
        let Ok(handle) = normalize_handle(raw) else {
            return Ok(SignUpOutcome::rejected(SignUpRejection::Empty));
        };

        match self.profiles.lookup(&handle).await {
            Ok(HandleStatus::Found) => {
                session.sign_in(&handle)?;
                Ok(SignUpOutcome::Navigate(Route::Map))
            }
            Ok(HandleStatus::NotFound) => {
                info!("Sign-up refused: {handle} does not exist");
                Ok(SignUpOutcome::rejected(SignUpRejection::NotFound))
            }
            Err(e) => {
                warn!("Sign-up lookup for {handle} failed: {e}");
                Ok(SignUpOutcome::rejected(SignUpRejection::LookupFailed(
                    e.to_string(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::testing::StaticProfiles;

    fn empty_session() -> SessionContext {
        SessionContext::new(Arc::new(MemorySessionStore::new()))
    }

    #[tokio::test]
    async fn known_handle_is_stored_trimmed() {
        let profiles = Arc::new(StaticProfiles::knowing(&["torvalds"]));
        let flow = SignUpFlow::new(profiles.clone());
        let session = empty_session();

        let outcome = flow.submit(&session, "  torvalds ").await.unwrap();

        assert_eq!(outcome, SignUpOutcome::Navigate(Route::Map));
        assert_eq!(session.current_handle().unwrap(), Some("torvalds".to_string()));
        assert_eq!(profiles.calls(), 1);
    }

    #[tokio::test]
    async fn unknown_handle_is_not_stored() {
        let flow = SignUpFlow::new(Arc::new(StaticProfiles::knowing(&["torvalds"])));
        let session = empty_session();

        let outcome = flow.submit(&session, "nobody-here").await.unwrap();

        assert_eq!(
            outcome,
            SignUpOutcome::Rejected {
                reason: SignUpRejection::NotFound,
                alert: Alert::invalid_username(),
            }
        );
        assert!(!session.is_signed_in().unwrap());
    }

    #[tokio::test]
    async fn blank_handle_skips_lookup() {
        let profiles = Arc::new(StaticProfiles::knowing(&[]));
        let flow = SignUpFlow::new(profiles.clone());

        let outcome = flow.submit(&empty_session(), "   ").await.unwrap();

        assert!(matches!(
            outcome,
            SignUpOutcome::Rejected {
                reason: SignUpRejection::Empty,
                ..
            }
        ));
        assert_eq!(profiles.calls(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_shows_same_alert() {
        let flow = SignUpFlow::new(Arc::new(StaticProfiles::failing()));
        let session = empty_session();

        match flow.submit(&session, "torvalds").await.unwrap() {
            SignUpOutcome::Rejected { reason, alert } => {
                assert!(matches!(reason, SignUpRejection::LookupFailed(_)));
                assert_eq!(alert, Alert::invalid_username());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(!session.is_signed_in().unwrap());
    }

    #[test]
    fn on_mount_skips_form_when_signed_in() {
        let flow = SignUpFlow::new(Arc::new(StaticProfiles::default()));
        let session = SessionContext::new(Arc::new(MemorySessionStore::signed_in("tj")));

        assert_eq!(flow.on_mount(&session), Some(Route::Map));
        assert_eq!(flow.on_mount(&empty_session()), None);
    }
}
