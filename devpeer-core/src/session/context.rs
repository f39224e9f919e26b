//! Explicit session context.

use std::sync::Arc;

use log::info;

use super::error::SessionResult;
use super::store::SessionStore;

/// The signed-in state of this device.
///
/// Every consumer that needs to know who is signed in receives a
/// `SessionContext` rather than reaching for a global store. Cloning is
/// cheap and all clones see the same store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Wraps a store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns the signed-in handle, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn current_handle(&self) -> SessionResult<Option<String>> {
        self.store.get()
    }

    /// Returns whether a handle is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_signed_in(&self) -> SessionResult<bool> {
        Ok(self.store.get()?.is_some())
    }

    /// Records `handle` as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn sign_in(&self, handle: &str) -> SessionResult<()> {
        self.store.set(handle)?;
        info!("Signed in as {handle}");
        Ok(())
    }

    /// Forgets the signed-in user. The directory record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn sign_out(&self) -> SessionResult<()> {
        self.store.clear()?;
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn sign_in_and_out() {
        let context = SessionContext::new(Arc::new(MemorySessionStore::new()));
        assert!(!context.is_signed_in().unwrap());

        context.sign_in("alice").unwrap();
        assert_eq!(context.current_handle().unwrap(), Some("alice".to_string()));

        context.sign_out().unwrap();
        assert!(!context.is_signed_in().unwrap());
    }

    #[test]
    fn clones_share_the_store() {
        let context = SessionContext::new(Arc::new(MemorySessionStore::new()));
        let other = context.clone();

        context.sign_in("bob").unwrap();
        assert_eq!(other.current_handle().unwrap(), Some("bob".to_string()));
    }

    #[test]
    fn debug_does_not_expose_store() {
        let context = SessionContext::new(Arc::new(MemorySessionStore::signed_in("x")));
        let debug_str = format!("{context:?}");
        assert!(debug_str.contains("SessionContext"));
    }
}
