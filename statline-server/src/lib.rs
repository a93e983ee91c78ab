//! statline-server library - HTTP surface for the running-average engine
//!
//! Ingest batches of per-game stat lines and query per-player and per-team
//! averages over REST.

use std::sync::Arc;

use axum::Router;
use statline_common::IngestCoordinator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod validation;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Player and team stores behind one ingest coordinator
    pub coordinator: Arc<IngestCoordinator>,
}

impl AppState {
    /// Create new application state
    pub fn new(coordinator: IngestCoordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/ingest", post(api::ingest_stats))
        .route("/api/stats/player/:name", get(api::get_player_stats))
        .route("/api/stats/team/:name", get(api::get_team_stats))
        .layer(CorsLayer::permissive());

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
