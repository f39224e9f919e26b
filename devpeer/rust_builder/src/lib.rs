//! Flutter-Rust bridge wrapper for devpeer-core.
//!
//! This crate serves as a thin wrapper that exposes `devpeer-core` to the
//! Flutter build system via Cargokit. Screens call into [`api`]; the native
//! logger is set up in [`logger`]. The map screen's platform steps come back
//! through Dart callbacks wrapped in [`location`].

pub mod api;
mod location;
mod logger;

pub use devpeer_core::*;
