//! Model and schema handlers

use axum::{extract::State, Json};

use churn_core::SchemaInfo;

use crate::models::ModelStatus;
use crate::AppState;

/// Column schema the encoder fills
pub async fn schema(State(state): State<AppState>) -> Json<SchemaInfo> {
    Json(state.predictor.schema_info())
}

/// Loaded artifacts and inference stats
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(ModelStatus {
        model_loaded: state.metadata.is_some(),
        metadata: state.metadata.as_deref().cloned(),
        engine: state.predictor.engine_status(),
        thresholds: state.predictor.thresholds(),
    })
}
