//! Prediction API models

use serde::Serialize;

use churn_core::logic::features::NamedFeature;
use churn_core::{EngineStatus, ModelMetadata, PredictionResult, RiskThresholds};

/// Prediction plus the vector the classifier saw
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedPrediction {
    #[serde(flatten)]
    pub result: PredictionResult,
    pub schema_hash: u32,
    pub features: Vec<NamedFeature>,
}

/// Loaded model and runtime stats
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    pub model_loaded: bool,
    pub metadata: Option<ModelMetadata>,
    pub engine: EngineStatus,
    pub thresholds: RiskThresholds,
}
