//! Average retrieval endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use statline_common::{Namespace, Snapshot};

use crate::AppState;

/// Season averages for one player
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsResponse {
    pub player_name: String,
    #[serde(flatten)]
    pub stats: Snapshot,
}

/// Season averages for one team
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsResponse {
    pub team_name: String,
    #[serde(flatten)]
    pub stats: Snapshot,
}

/// GET /api/stats/player/:name
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Result<Json<PlayerStatsResponse>, StatsError> {
    let stats = state
        .coordinator
        .query(Namespace::Player, &player_name)
        .ok_or_else(|| StatsError::NotFound(Namespace::Player, player_name.clone()))?;

    Ok(Json(PlayerStatsResponse { player_name, stats }))
}

/// GET /api/stats/team/:name
pub async fn get_team_stats(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
) -> Result<Json<TeamStatsResponse>, StatsError> {
    let stats = state
        .coordinator
        .query(Namespace::Team, &team_name)
        .ok_or_else(|| StatsError::NotFound(Namespace::Team, team_name.clone()))?;

    Ok(Json(TeamStatsResponse { team_name, stats }))
}

/// Stats API errors
#[derive(Debug)]
pub enum StatsError {
    NotFound(Namespace, String),
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            StatsError::NotFound(Namespace::Player, name) => {
                (StatusCode::NOT_FOUND, format!("Player not found: {}", name))
            }
            StatsError::NotFound(Namespace::Team, name) => {
                (StatusCode::NOT_FOUND, format!("Team not found: {}", name))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
