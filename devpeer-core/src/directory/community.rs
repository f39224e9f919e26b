//! Demo community shown when the app runs without a directory backend.
//!
//! Ten well-known developers placed around San Francisco.

use super::types::{RecordId, UserRecord};
use super::InMemoryDirectory;

/// Handles and positions of the demo community, in display order.
pub const DEMO_COMMUNITY: &[(&str, f64, f64)] = &[
    ("torvalds", 37.7749, -122.4194),
    ("gaearon", 37.8044, -122.2712),
    ("sindresorhus", 37.7849, -122.4294),
    ("yyx990803", 37.7949, -122.4094),
    ("tj", 37.7649, -122.4494),
    ("kentcdodds", 37.7740, -122.4190),
    ("addyosmani", 37.7840, -122.4280),
    ("driesvints", 37.7940, -122.4380),
    ("thekitze", 37.7540, -122.4180),
    ("rauchg", 37.7440, -122.4080),
];

/// Builds the demo records, ids `"1"` to `"10"`, with avatars under `web_base_url`.
#[must_use]
pub fn demo_users(web_base_url: &str) -> Vec<UserRecord> {
    DEMO_COMMUNITY
        .iter()
        .enumerate()
        .map(|(i, (handle, latitude, longitude))| UserRecord {
            id: Some(RecordId::Text((i + 1).to_string())),
            handle: (*handle).to_string(),
            latitude: *latitude,
            longitude: *longitude,
            avatar_url: super::avatar_url_for(web_base_url, handle),
        })
        .collect()
}

/// An [`InMemoryDirectory`] seeded with [`demo_users`].
#[must_use]
pub fn demo_directory(web_base_url: &str) -> InMemoryDirectory {
    InMemoryDirectory::with_records(demo_users(web_base_url))
}
