//! Scripted collaborators for tests.
//!
//! Available under `cfg(test)` and the `test-utils` feature. Each double
//! counts its calls so tests can assert what a flow did *not* touch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Barrier};

use crate::directory::{
    DirectoryError, DirectoryResult, InMemoryDirectory, UserDirectory, UserRecord,
};
use crate::location::{
    Coordinate, LocationError, LocationProvider, LocationResult, PermissionStatus,
};
use crate::profile::{HandleStatus, ProfileError, ProfileLookup, ProfileResult};

const INJECTED_URL: &str = "memory://users";

/// A [`LocationProvider`] with a fixed script and call counters.
///
/// A gated provider blocks inside `request_permission` until
/// [`open_gate`](Self::open_gate) is called.
#[derive(Debug)]
pub struct ScriptedLocation {
    permission: PermissionStatus,
    reading: LocationResult<Coordinate>,
    gate: Option<watch::Sender<bool>>,
    permission_requests: AtomicUsize,
    reading_requests: AtomicUsize,
}

impl ScriptedLocation {
    fn scripted(permission: PermissionStatus, reading: LocationResult<Coordinate>) -> Self {
        Self {
            permission,
            reading,
            gate: None,
            permission_requests: AtomicUsize::new(0),
            reading_requests: AtomicUsize::new(0),
        }
    }

    /// Grants permission and reports `(latitude, longitude)`.
    ///
    /// An out-of-range pair makes the reading fail validation.
    #[must_use]
    pub fn granted(latitude: f64, longitude: f64) -> Self {
        Self::scripted(
            PermissionStatus::Granted,
            Coordinate::new(latitude, longitude),
        )
    }

    /// Refuses permission.
    #[must_use]
    pub fn denied() -> Self {
        Self::scripted(
            PermissionStatus::Denied,
            Err(LocationError::Unavailable("permission denied".to_string())),
        )
    }

    /// Grants permission but fails the reading.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::scripted(
            PermissionStatus::Granted,
            Err(LocationError::Unavailable("scripted failure".to_string())),
        )
    }

    /// Blocks the permission prompt until the gate opens.
    #[must_use]
    pub fn gated(mut self) -> Self {
        let (gate, _) = watch::channel(false);
        self.gate = Some(gate);
        self
    }

    /// Releases every pending and future permission prompt.
    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.send_replace(true);
        }
    }

    /// Number of permission prompts so far.
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    /// Number of location readings so far.
    pub fn reading_requests(&self) -> usize {
        self.reading_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let mut open = gate.subscribe();
            let _ = open.wait_for(|open| *open).await;
        }
        self.permission
    }

    async fn current_coordinate(&self) -> LocationResult<Coordinate> {
        self.reading_requests.fetch_add(1, Ordering::SeqCst);
        self.reading.clone()
    }
}

/// A [`UserDirectory`] wrapping an [`InMemoryDirectory`], with call counters
/// and failure injection.
#[derive(Debug, Default)]
pub struct RecordingDirectory {
    inner: InMemoryDirectory,
    fail_lookup: bool,
    fail_create: bool,
    fail_fetch_all: bool,
    lookup_barrier: Option<Arc<Barrier>>,
    find_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fetch_all_calls: AtomicUsize,
}

impl RecordingDirectory {
    /// An empty, well-behaved directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory pre-seeded with `records`.
    #[must_use]
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            inner: InMemoryDirectory::with_records(records),
            ..Self::default()
        }
    }

    /// Fails every `find_by_handle`.
    #[must_use]
    pub const fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    /// Fails every `create`.
    #[must_use]
    pub const fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Fails every `fetch_all`.
    #[must_use]
    pub const fn failing_fetch_all(mut self) -> Self {
        self.fail_fetch_all = true;
        self
    }

    /// Makes every lookup wait on `barrier` after reading, so concurrent
    /// registrations observe the same pre-create state.
    #[must_use]
    pub fn pausing_lookups(mut self, barrier: Arc<Barrier>) -> Self {
        self.lookup_barrier = Some(barrier);
        self
    }

    /// The wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &InMemoryDirectory {
        &self.inner
    }

    /// Number of `find_by_handle` calls.
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_all` calls.
    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    /// Calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.find_calls() + self.create_calls() + self.fetch_all_calls()
    }
}

fn injected() -> DirectoryError {
    DirectoryError::UnexpectedStatus {
        status: 503,
        url: INJECTED_URL.to_string(),
    }
}

#[async_trait]
impl UserDirectory for RecordingDirectory {
    async fn find_by_handle(&self, handle: &str) -> DirectoryResult<Vec<UserRecord>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup {
            return Err(injected());
        }
        let found = self.inner.find_by_handle(handle).await?;
        if let Some(barrier) = &self.lookup_barrier {
            barrier.wait().await;
        }
        Ok(found)
    }

    async fn create(&self, record: &UserRecord) -> DirectoryResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(injected());
        }
        self.inner.create(record).await
    }

    async fn fetch_all(&self) -> DirectoryResult<Vec<UserRecord>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch_all {
            return Err(injected());
        }
        self.inner.fetch_all().await
    }
}

/// A [`ProfileLookup`] answering from a fixed list of known handles.
#[derive(Debug, Default)]
pub struct StaticProfiles {
    known: Vec<String>,
    failing: bool,
    calls: AtomicUsize,
}

impl StaticProfiles {
    /// Knows exactly `handles`.
    #[must_use]
    pub fn knowing(handles: &[&str]) -> Self {
        Self {
            known: handles.iter().map(|h| (*h).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Fails every lookup as a server error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Number of lookups so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileLookup for StaticProfiles {
    async fn lookup(&self, handle: &str) -> ProfileResult<HandleStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(ProfileError::UnexpectedStatus(500));
        }
        if self.known.iter().any(|known| known == handle) {
            Ok(HandleStatus::Found)
        } else {
            Ok(HandleStatus::NotFound)
        }
    }
}
