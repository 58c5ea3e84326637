//! Runtime caches used by application services.
//!
//! - [`snapshot::SnapshotCache`]: raw payloads with TTL-based expiration

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotCache};
