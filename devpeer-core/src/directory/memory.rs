//! Process-local directory.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::client::UserDirectory;
use super::error::DirectoryResult;
use super::types::{RecordId, UserRecord};

/// [`UserDirectory`] held in memory.
///
/// Used as the demo community when no backend is configured. Lookups and
/// creates take the lock separately, so it races exactly like the REST
/// backend does.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    records: Mutex<Vec<UserRecord>>,
    next_id: AtomicU64,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `records`.
    ///
    /// Records without an id get one assigned.
    #[must_use]
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        let mut directory = Self::new();
        let seeded: Vec<UserRecord> = records
            .into_iter()
            .map(|record| directory.assign_id(record))
            .collect();
        *directory.records.get_mut() = seeded;
        directory
    }

    fn assign_id(&self, mut record: UserRecord) -> UserRecord {
        if record.id.is_none() {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            record.id = Some(RecordId::Number(id));
        }
        record
    }

    /// Returns a copy of every stored record.
    pub async fn snapshot(&self) -> Vec<UserRecord> {
        self.records.lock().await.clone()
    }

    /// Number of stored records with `handle`.
    pub async fn count_handle(&self, handle: &str) -> usize {
        self.records
            .lock()
            .await
            .iter()
            .filter(|r| r.handle == handle)
            .count()
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_handle(&self, handle: &str) -> DirectoryResult<Vec<UserRecord>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.handle == handle)
            .cloned()
            .collect())
    }

    async fn create(&self, record: &UserRecord) -> DirectoryResult<()> {
        let record = self.assign_id(UserRecord {
            id: None,
            ..record.clone()
        });
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn fetch_all(&self) -> DirectoryResult<Vec<UserRecord>> {
        Ok(self.snapshot().await)
    }
}
