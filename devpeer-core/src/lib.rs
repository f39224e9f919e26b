//! DevPeer Core Library
//!
//! Core functionality for DevPeer - find developers near you.
//! Users sign up with a GitHub handle, register their location in a shared
//! directory, and see everyone else on a map.
//!
//! The platform layer owns rendering, the permission prompt, and GPS access;
//! everything else lives here:
//!
//! - [`signup`]: handle validation and sign-in
//! - [`bootstrap`]: the map screen's startup sequence
//! - [`directory`]: the shared user directory
//! - [`session`]: the persisted session token
//! - [`location`]: coordinates and the location provider contract

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod bootstrap;
pub mod config;
pub mod directory;
pub mod location;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod signup;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::{CoreError, CoreResult, DevPeerCore, SESSION_DB_FILE};
pub use config::DevPeerConfig;
