//! Device location for the map.
//!
//! The platform owns the permission prompt and the GPS hardware; this module
//! defines the contract the bootstrap workflow drives:
//!
//! 1. [`LocationProvider::request_permission`] must be called first.
//! 2. A denial ends the current bootstrap. There is no re-prompt loop.
//! 3. [`LocationProvider::current_coordinate`] is read once per bootstrap.
//!
//! Readings are validated into a [`Coordinate`] and never stored.
//!
//! # Example Usage
//!
//! ```
//! use devpeer_core::location::{Coordinate, MapRegion};
//!
//! let here = Coordinate::new(37.7749, -122.4194).unwrap();
//! let region = MapRegion::around(here, 0.25);
//! assert_eq!(region.latitude_delta, 0.25);
//! assert!(Coordinate::new(91.0, 0.0).is_err());
//! ```

mod error;
mod provider;
mod types;

pub use error::{LocationError, LocationResult};
pub use provider::{LocationProvider, PermissionStatus};
pub use types::{Coordinate, MapRegion};
