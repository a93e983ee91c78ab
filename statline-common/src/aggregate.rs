//! Per-key running average
//!
//! An [`Aggregate`] keeps `(count, mean)` for every sample accepted under one
//! key. The pair lives in a single [`Snapshot`] value behind an `RwLock`:
//! writers compute the replacement snapshot in full and then swap it in with
//! one assignment, so readers only ever see a committed pair.
//!
//! An aggregate is always created from its first sample, so `count` is never
//! zero and a snapshot always describes at least one accepted game.

use std::sync::RwLock;

use serde::Serialize;

use crate::sample::Sample;
use crate::{Error, Result};

/// Consistent copy of an aggregate's state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Number of samples accepted so far
    #[serde(rename = "gamesPlayed")]
    pub count: u64,
    /// Arithmetic mean of every accepted sample
    #[serde(flatten)]
    pub mean: Sample,
}

impl Snapshot {
    /// Snapshot that results from folding `sample` into this one
    fn with(&self, sample: &Sample) -> Result<Snapshot> {
        let count = self
            .count
            .checked_add(1)
            .ok_or_else(|| Error::Internal("aggregate count overflow".to_string()))?;

        Ok(Snapshot {
            count,
            mean: self.mean.merge_mean(self.count, sample),
        })
    }
}

/// Running `(count, mean)` state for one key
#[derive(Debug)]
pub struct Aggregate {
    state: RwLock<Snapshot>,
}

impl Aggregate {
    /// Aggregate whose only accepted sample is `first`
    ///
    /// Folding a sample into an empty mean yields the sample unchanged, so
    /// the first snapshot is `(1, first)`.
    pub fn with_first(first: &Sample) -> Self {
        Self {
            state: RwLock::new(Snapshot {
                count: 1,
                mean: *first,
            }),
        }
    }

    /// Fold one sample into the running mean
    ///
    /// Returns the snapshot committed by this call. On error the previous
    /// snapshot is left in place.
    pub fn accept(&self, sample: &Sample) -> Result<Snapshot> {
        let mut state = self
            .state
            .write()
            .map_err(|_| Error::Internal("aggregate lock poisoned".to_string()))?;

        let next = state.with(sample)?;
        *state = next;
        Ok(next)
    }

    /// Current committed `(count, mean)` pair
    pub fn read(&self) -> Result<Snapshot> {
        self.state
            .read()
            .map(|state| *state)
            .map_err(|_| Error::Internal("aggregate lock poisoned".to_string()))
    }
}
