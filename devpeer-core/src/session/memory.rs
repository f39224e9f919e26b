//! In-memory session store.

use std::sync::RwLock;

use super::error::{SessionError, SessionResult};
use super::store::SessionStore;

/// In-memory [`SessionStore`] for tests.
///
/// Nothing is persisted; the handle is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    handle: RwLock<Option<String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `handle`.
    #[must_use]
    pub fn signed_in(handle: &str) -> Self {
        Self {
            handle: RwLock::new(Some(handle.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionResult<Option<String>> {
        let handle = self
            .handle
            .read()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(handle.clone())
    }

    fn set(&self, handle: &str) -> SessionResult<()> {
        let mut stored = self
            .handle
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        *stored = Some(handle.to_string());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut stored = self
            .handle
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        *stored = None;
        Ok(())
    }
}
