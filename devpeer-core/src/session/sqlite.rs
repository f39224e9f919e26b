//! `SQLite` storage for the session token.
//!
//! The database holds a single key/value table so further local settings
//! can live next to the session without a schema change.

// SQLite operations need to hold the lock for the duration of the operation.
#![allow(clippy::significant_drop_tightening)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::error::{SessionError, SessionResult};
use super::store::{SessionStore, SESSION_KEY};

/// `SQLite`-backed [`SessionStore`].
///
/// Thread-safe wrapper around a `SQLite` connection.
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

impl SqliteSessionStore {
    /// Opens (or creates) the session database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn new(path: &Path) -> SessionResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SessionError::Storage(format!("Failed to create data directory: {e}"))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Creates an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> SessionResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn lock(&self) -> SessionResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SessionError::Storage(format!("Failed to acquire database lock: {e}")))
    }

    fn initialize_schema(&self) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self) -> SessionResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![SESSION_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, handle: &str) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![SESSION_KEY, handle, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![SESSION_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_returns_none() {
        let store = SqliteSessionStore::in_memory().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let store = SqliteSessionStore::in_memory().unwrap();
        store.set("alice").unwrap();
        assert_eq!(store.get().unwrap(), Some("alice".to_string()));
    }

    #[test]
    fn set_overwrites_previous_handle() {
        let store = SqliteSessionStore::in_memory().unwrap();
        store.set("alice").unwrap();
        store.set("bob").unwrap();
        assert_eq!(store.get().unwrap(), Some("bob".to_string()));
    }

    #[test]
    fn clear_removes_handle() {
        let store = SqliteSessionStore::in_memory().unwrap();
        store.set("alice").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn clear_on_empty_store_succeeds() {
        let store = SqliteSessionStore::in_memory().unwrap();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn handle_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.db");

        {
            let store = SqliteSessionStore::new(&path).unwrap();
            store.set("torvalds").unwrap();
        }

        let reopened = SqliteSessionStore::new(&path).unwrap();
        assert_eq!(reopened.get().unwrap(), Some("torvalds".to_string()));
    }
}
