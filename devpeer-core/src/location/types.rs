//! Location data types.

use serde::{Deserialize, Serialize};

use super::error::{LocationError, LocationResult};

/// A validated latitude/longitude pair in degrees.
///
/// Latitude is within -90.0 to 90.0 and longitude within -180.0 to 180.0;
/// both are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Validates a raw reading.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvalidCoordinate`] for NaN, infinite, or
    /// out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use devpeer_core::location::Coordinate;
    ///
    /// let c = Coordinate::new(37.0, -122.0).unwrap();
    /// assert_eq!(c.latitude, 37.0);
    /// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> LocationResult<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if lat_ok && lon_ok {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(LocationError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }
}

/// The initial viewport of the map, centred on the current user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Centre latitude.
    pub latitude: f64,
    /// Centre longitude.
    pub longitude: f64,
    /// Visible latitude span in degrees.
    pub latitude_delta: f64,
    /// Visible longitude span in degrees.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Square region of `delta` degrees around `center`.
    #[must_use]
    pub const fn around(center: Coordinate, delta: f64) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }
}
