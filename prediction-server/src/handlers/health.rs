//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    schema_hash: u32,
    timestamp: i64,
}

/// Liveness plus the schema the predictor was built against
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        schema_hash: state.predictor.schema_info().hash,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
