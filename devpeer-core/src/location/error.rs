//! Error types for location readings.

use thiserror::Error;

/// Errors that can occur while reading the device location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// The platform could not produce a reading.
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The platform produced a reading outside the valid ranges.
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        /// Reported latitude.
        latitude: f64,
        /// Reported longitude.
        longitude: f64,
    },
}

/// Result type for location operations.
pub type LocationResult<T> = Result<T, LocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_display() {
        let err = LocationError::Unavailable("gps timeout".to_string());
        assert_eq!(err.to_string(), "Location unavailable: gps timeout");
    }

    #[test]
    fn invalid_coordinate_error_display() {
        let err = LocationError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid coordinate: latitude 91, longitude 0"
        );
    }
}
