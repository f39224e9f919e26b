//! Handle validation against the public profile service.
//!
//! A handle is valid when the public profile API answers a lookup with a
//! success status. [`ProfileLookup::lookup`] keeps the reason a check failed
//! (`NotFound` versus a transport or server error), while
//! [`ProfileLookup::is_valid_handle`] collapses everything to a boolean for
//! callers that only need the sign-up decision.

mod error;
mod validator;

pub use error::{ProfileError, ProfileResult};
pub use validator::{normalize_handle, GitHubProfileClient, HandleStatus, ProfileLookup};
