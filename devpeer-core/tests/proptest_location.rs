//! Property-based tests for coordinates, map regions, and directory records.

// Coordinates are copied into records and regions unchanged, so exact float
// comparison is intended.
#![allow(clippy::float_cmp)]

use devpeer_core::directory::UserRecord;
use devpeer_core::location::{Coordinate, LocationError, MapRegion};
use proptest::prelude::*;

fn valid_latitude() -> impl Strategy<Value = f64> {
    -90.0_f64..=90.0
}

fn valid_longitude() -> impl Strategy<Value = f64> {
    -180.0_f64..=180.0
}

/// Handles as GitHub allows them: alphanumerics and single hyphens.
fn handle() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,20}(-[A-Za-z0-9]{1,10})?"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn in_range_coordinates_are_accepted(lat in valid_latitude(), lng in valid_longitude()) {
        let coordinate = Coordinate::new(lat, lng).unwrap();
        prop_assert_eq!(coordinate.latitude, lat);
        prop_assert_eq!(coordinate.longitude, lng);
    }

    #[test]
    fn out_of_range_latitude_is_rejected(
        lat in prop_oneof![-1.0e6_f64..-90.000_001, 90.000_001_f64..1.0e6],
        lng in valid_longitude(),
    ) {
        let is_invalid = matches!(
            Coordinate::new(lat, lng),
            Err(LocationError::InvalidCoordinate { .. })
        );
        prop_assert!(is_invalid);
    }

    #[test]
    fn out_of_range_longitude_is_rejected(
        lat in valid_latitude(),
        lng in prop_oneof![-1.0e6_f64..-180.000_001, 180.000_001_f64..1.0e6],
    ) {
        prop_assert!(Coordinate::new(lat, lng).is_err());
    }

    #[test]
    fn region_is_centred_on_reading(
        lat in valid_latitude(),
        lng in valid_longitude(),
        delta in 0.001_f64..10.0,
    ) {
        let centre = Coordinate::new(lat, lng).unwrap();
        let region = MapRegion::around(centre, delta);

        prop_assert_eq!(region.latitude, lat);
        prop_assert_eq!(region.longitude, lng);
        prop_assert_eq!(region.latitude_delta, delta);
        prop_assert_eq!(region.longitude_delta, delta);
    }

    /// The POST body never carries an id and always carries the four wire keys.
    #[test]
    fn new_record_wire_shape(
        handle in handle(),
        lat in valid_latitude(),
        lng in valid_longitude(),
    ) {
        let record = UserRecord::new(
            &handle,
            Coordinate::new(lat, lng).unwrap(),
            "https://github.com",
        );
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        prop_assert!(!object.contains_key("id"));
        prop_assert_eq!(object.len(), 4);
        prop_assert_eq!(object["username"].as_str().unwrap(), handle.as_str());
        prop_assert_eq!(object["lat"].as_f64().unwrap(), lat);
        prop_assert_eq!(object["lng"].as_f64().unwrap(), lng);
        prop_assert_eq!(
            object["avatarUrl"].as_str().unwrap(),
            format!("https://github.com/{handle}.png")
        );
    }
}
