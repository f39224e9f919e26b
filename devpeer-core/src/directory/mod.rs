//! The user directory backend.
//!
//! The directory holds one [`UserRecord`] per registered device location and
//! serves the full list to every map. It is owned by DevPeer, unlike the
//! public profile service used for sign-up.
//!
//! # Registration
//!
//! [`UserDirectory::register`] is a check-then-act sequence: look the handle
//! up, and create a record only if none came back. Two registrations for the
//! same handle that interleave between the check and the create both insert,
//! leaving duplicate records. The first record written is never updated.
//!
//! # Types
//!
//! - [`UserRecord`]: a registered user and their last reported position
//! - [`HttpDirectoryClient`]: REST client for the backend
//! - [`InMemoryDirectory`]: process-local directory, seeded with the demo
//!   community when the app runs without a backend

pub mod community;
mod client;
mod error;
mod memory;
mod types;

pub use client::{HttpDirectoryClient, RegistrationOutcome, UserDirectory};
pub use error::{DirectoryError, DirectoryResult};
pub use memory::InMemoryDirectory;
pub use types::{avatar_url_for, RecordId, UserRecord};
