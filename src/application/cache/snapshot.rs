//! TTL cache of raw payloads, keyed by source URL.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchError;

/// An immutable payload from one successful fetch.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Monotonic across the whole cache; a refetch always gets a new version.
    pub version: u64,
    pub fetched_at: Instant,
    pub data: Arc<Value>,
}

impl Snapshot {
    /// True while the snapshot is younger than `ttl`. A zero TTL never is.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        !ttl.is_zero() && self.fetched_at.elapsed() < ttl
    }

    /// Decode the payload into a typed shape; a mismatch is an envelope error.
    pub fn decode<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        T::deserialize(self.data.as_ref()).map_err(|err| FetchError::Envelope {
            url: url.to_string(),
            reason: format!("unexpected data shape: {err}"),
        })
    }
}

/// Thread-safe cache of payload snapshots.
pub struct SnapshotCache {
    entries: RwLock<HashMap<String, Snapshot>>,
    next_version: AtomicU64,
}

impl SnapshotCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            next_version: AtomicU64::new(1),
        }
    }

    /// Cached snapshot for `url`, if it is still within `ttl`.
    #[must_use]
    pub fn get_fresh(&self, url: &str, ttl: Duration) -> Option<Snapshot> {
        self.entries
            .read()
            .get(url)
            .filter(|snapshot| snapshot.is_fresh(ttl))
            .cloned()
    }

    /// Store a freshly fetched payload, replacing any previous snapshot.
    pub fn insert(&self, url: &str, data: Value) -> Snapshot {
        let snapshot = Snapshot {
            version: self.next_version.fetch_add(1, Ordering::Relaxed),
            fetched_at: Instant::now(),
            data: Arc::new(data),
        };
        self.entries.write().insert(url.to_string(), snapshot.clone());
        snapshot
    }

    /// Drop the snapshot for `url`.
    pub fn invalidate(&self, url: &str) {
        self.entries.write().remove(url);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
