//! Prediction handlers
//!
//! Every form change posts the whole input; each request is one full,
//! synchronous evaluation and the latest response supersedes earlier ones.

use axum::{extract::State, Json};
use validator::Validate;

use churn_core::{PredictionResult, RawInput};

use crate::models::ExplainedPrediction;
use crate::{AppResult, AppState};

/// Evaluate one customer
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<RawInput>,
) -> AppResult<Json<PredictionResult>> {
    input.validate()?;

    let result = state.predictor.predict(&input)?;

    tracing::debug!(
        tier = %result.risk_tier,
        probability = result.probability,
        "prediction served"
    );

    Ok(Json(result))
}

/// Evaluate one customer and return the encoded feature vector
pub async fn explain(
    State(state): State<AppState>,
    Json(input): Json<RawInput>,
) -> AppResult<Json<ExplainedPrediction>> {
    input.validate()?;

    let (result, vector) = state.predictor.predict_explained(&input)?;

    Ok(Json(ExplainedPrediction {
        result,
        schema_hash: vector.schema_hash(),
        features: vector.to_named(),
    }))
}
