//! Storage abstraction for the session token.

use super::error::SessionResult;

/// Storage key for the signed-in handle.
pub const SESSION_KEY: &str = "devpeer.session.handle";

/// Device-local storage for the session token.
///
/// Calls are local and short; implementations may block on disk I/O but
/// must not wait on the network.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a store can be shared between
/// the sign-up flow and a spawned bootstrap task.
pub trait SessionStore: Send + Sync {
    /// Returns the stored handle, or `None` if nobody has signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get(&self) -> SessionResult<Option<String>>;

    /// Stores `handle`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn set(&self, handle: &str) -> SessionResult<()>;

    /// Removes the stored handle. Succeeds when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn clear(&self) -> SessionResult<()>;
}
