//! Key-indexed aggregate store
//!
//! One [`Store`] per namespace (players, teams). Aggregates are created
//! lazily on the first submission for a key and live for the rest of the
//! process.
//!
//! # Concurrency
//!
//! The map is a sharded `DashMap`. Creating a key goes through the entry API,
//! which holds only that key's shard lock, so two racing first writers see
//! the same `Aggregate`. The winner of that race inserts an aggregate already
//! holding its sample; a key is never visible before its first sample is in.
//! Later samples are applied after the shard guard is dropped, under the
//! aggregate's own lock, and never block unrelated keys.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error, warn};

use crate::aggregate::{Aggregate, Snapshot};
use crate::sample::Sample;

/// Submission and lookup contract the ingest coordinator is written against
pub trait StatsStore: Send + Sync {
    /// Fold `sample` into the aggregate for `key`
    ///
    /// Returns `false` without touching any state when `key` is blank, and
    /// `false` when the update itself faulted.
    fn submit(&self, key: &str, sample: &Sample) -> bool;

    /// Committed snapshot for `key`, or `None` if it was never written
    fn query(&self, key: &str) -> Option<Snapshot>;
}

/// In-memory store of running averages
#[derive(Debug, Default)]
pub struct Store {
    name: &'static str,
    aggregates: DashMap<String, Arc<Aggregate>>,
}

impl Store {
    /// Create an empty store; `name` only labels log output
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            aggregates: DashMap::new(),
        }
    }

    /// Number of distinct keys that have received at least one sample
    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    /// Aggregate for `key`, creating it from `sample` if this is the first write
    ///
    /// Returns `None` when this call created the aggregate, in which case
    /// `sample` has already been counted.
    fn aggregate_for(&self, key: &str, sample: &Sample) -> Option<Arc<Aggregate>> {
        if let Some(existing) = self.aggregates.get(key) {
            return Some(Arc::clone(existing.value()));
        }

        let mut created = false;
        let entry = self.aggregates.entry(key.to_string()).or_insert_with(|| {
            created = true;
            Arc::new(Aggregate::with_first(sample))
        });
        if created {
            None
        } else {
            Some(Arc::clone(entry.value()))
        }
    }
}

impl StatsStore for Store {
    fn submit(&self, key: &str, sample: &Sample) -> bool {
        if key.trim().is_empty() {
            warn!(store = self.name, "Rejected submission with blank key");
            return false;
        }

        let Some(aggregate) = self.aggregate_for(key, sample) else {
            debug!(store = self.name, key, count = 1, "Sample accepted");
            return true;
        };

        match aggregate.accept(sample) {
            Ok(snapshot) => {
                debug!(store = self.name, key, count = snapshot.count, "Sample accepted");
                true
            }
            Err(e) => {
                error!(store = self.name, key, "Failed to apply sample: {}", e);
                false
            }
        }
    }

    fn query(&self, key: &str) -> Option<Snapshot> {
        // Clone the Arc so the shard guard is released before taking the read lock
        let aggregate = self.aggregates.get(key).map(|e| Arc::clone(e.value()))?;
        match aggregate.read() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!(store = self.name, key, "Failed to read aggregate: {}", e);
                None
            }
        }
    }
}
