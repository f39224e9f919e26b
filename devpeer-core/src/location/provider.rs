//! Location provider contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::LocationResult;
use super::types::Coordinate;

/// Result of the foreground location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// The user allowed location access.
    Granted,
    /// The user refused, or the platform refused on their behalf.
    Denied,
}

impl PermissionStatus {
    /// Returns true for [`PermissionStatus::Granted`].
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// Source of the device's permission state and position.
///
/// Implementations are provided by the platform layer.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Prompts for foreground location access.
    async fn request_permission(&self) -> PermissionStatus;

    /// Takes a single reading.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid reading could be obtained.
    async fn current_coordinate(&self) -> LocationResult<Coordinate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_from_bool() {
        assert_eq!(PermissionStatus::from(true), PermissionStatus::Granted);
        assert_eq!(PermissionStatus::from(false), PermissionStatus::Denied);
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
    }
}
