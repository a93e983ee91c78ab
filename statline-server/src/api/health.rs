//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use statline_common::Namespace;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Distinct players with at least one game
    pub players: usize,
    /// Distinct teams with at least one game
    pub teams: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "statline-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        players: state.coordinator.store(Namespace::Player).len(),
        teams: state.coordinator.store(Namespace::Team).len(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
