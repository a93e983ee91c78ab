//! HTTP API handlers for statline-server

pub mod health;
pub mod ingest;
pub mod stats;

pub use health::health_routes;
pub use ingest::ingest_stats;
pub use stats::{get_player_stats, get_team_stats};
