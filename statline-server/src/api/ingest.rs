//! Batch ingest endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use statline_common::StatsEntry;
use tracing::{debug, info};

use crate::validation::{validate_batch, FieldViolation};
use crate::AppState;

/// Batch of per-game entries
#[derive(Debug, Deserialize, Serialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub entries: Vec<StatsEntry>,
}

/// Result of a batch ingest
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    /// Entries filed under both their player and their team
    pub success_count: usize,
    /// Entries received
    pub total: usize,
}

/// POST /api/ingest
///
/// Validates the whole batch first; if any field is out of range nothing is
/// ingested. Valid batches are processed entry by entry and the number of
/// fully applied entries is returned.
pub async fn ingest_stats(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>, IngestError> {
    let Json(request) = payload?;

    let violations = validate_batch(&request.entries);
    if !violations.is_empty() {
        debug!("Validation failed: {} error(s)", violations.len());
        return Err(IngestError::Validation(violations));
    }

    let total = request.entries.len();
    let success_count = state.coordinator.process_batch(&request.entries);
    info!("Ingested {}/{} stats entries", success_count, total);

    Ok(Json(IngestResponse {
        success_count,
        total,
    }))
}

/// Ingest API errors
#[derive(Debug)]
pub enum IngestError {
    /// Body was not a readable ingest request
    Malformed(JsonRejection),
    Validation(Vec<FieldViolation>),
}

impl From<JsonRejection> for IngestError {
    fn from(rejection: JsonRejection) -> Self {
        IngestError::Malformed(rejection)
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        match self {
            IngestError::Malformed(rejection) => {
                debug!("Rejected ingest body: {}", rejection.body_text());
                let body = Json(json!({
                    "error": rejection.body_text(),
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            IngestError::Validation(violations) => {
                let body = Json(json!({
                    "error": format!("Validation failed: {} error(s)", violations.len()),
                    "violations": violations,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
