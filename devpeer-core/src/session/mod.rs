//! Local session persistence.
//!
//! A device is signed in when a handle is stored under [`SESSION_KEY`].
//! The token is created at sign-up, read on every start, and removed at
//! logout. It never expires and there is at most one per device.
//!
//! # Architecture
//!
//! ```text
//! SessionContext (passed explicitly to sign-up, bootstrap, logout)
//!     └── dyn SessionStore
//!           ├── SqliteSessionStore (device storage)
//!           └── MemorySessionStore (tests, `test-utils`)
//! ```

mod context;
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod sqlite;
mod store;

pub use context::SessionContext;
pub use error::{SessionError, SessionResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;
pub use store::{SessionStore, SESSION_KEY};
