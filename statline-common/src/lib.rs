//! # Statline Common Library
//!
//! In-memory running averages of per-game stat lines, kept for two
//! namespaces (players and teams) at once:
//! - `Sample`: immutable eight-field stat vector
//! - `Aggregate`: per-key `(count, mean)` with atomic accept/read
//! - `Store`: lazily populated, sharded key → aggregate map
//! - `IngestCoordinator`: files each record under its player and its team
//! - Configuration loading shared by the service binary

pub mod aggregate;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod record;
pub mod sample;
pub mod store;

pub use aggregate::{Aggregate, Snapshot};
pub use coordinator::{IngestCoordinator, Namespace};
pub use error::{Error, Result};
pub use record::{GameStats, StatsEntry};
pub use sample::Sample;
pub use store::{StatsStore, Store};
