//! Directory record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::{Coordinate, LocationResult};

/// Backend-assigned record identifier.
///
/// Depending on the backend this is a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier.
    Number(u64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A registered user.
///
/// Serialized with the directory's field names:
/// `{ "id"?, "username", "lat", "lng", "avatarUrl" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Assigned by the directory; absent on records not yet created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Profile handle, case-sensitive.
    #[serde(rename = "username")]
    pub handle: String,

    /// Latitude at registration time.
    #[serde(rename = "lat")]
    pub latitude: f64,

    /// Longitude at registration time.
    #[serde(rename = "lng")]
    pub longitude: f64,

    /// Avatar image URL.
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: String,
}

impl UserRecord {
    /// Builds an unsaved record for `handle` at `coordinate`.
    ///
    /// # Examples
    ///
    /// ```
    /// use devpeer_core::directory::UserRecord;
    /// use devpeer_core::location::Coordinate;
    ///
    /// let here = Coordinate::new(37.0, -122.0).unwrap();
    /// let record = UserRecord::new("alice", here, "https://github.com");
    /// assert_eq!(record.avatar_url, "https://github.com/alice.png");
    /// assert!(record.id.is_none());
    /// ```
    #[must_use]
    pub fn new(handle: &str, coordinate: Coordinate, web_base_url: &str) -> Self {
        Self {
            id: None,
            handle: handle.to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            avatar_url: avatar_url_for(web_base_url, handle),
        }
    }

    /// Returns the record's position, validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory holds an out-of-range position.
    pub fn coordinate(&self) -> LocationResult<Coordinate> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Avatar URL for `handle`: `{web_base_url}/{handle}.png`.
#[must_use]
pub fn avatar_url_for(web_base_url: &str, handle: &str) -> String {
    format!("{}/{handle}.png", web_base_url.trim_end_matches('/'))
}
