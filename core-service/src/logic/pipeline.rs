//! Prediction Pipeline
//!
//! RawInput → FeatureEncoder → RiskClassifier → risk policy → PredictionResult
//!
//! One synchronous evaluation per call. The predictor is built once from the
//! loaded artifacts and shared read-only between requests.

use std::sync::Arc;

use thiserror::Error;

use super::features::{ColumnSchema, FeatureEncoder, FeatureVector, RawInput, SchemaError, SchemaInfo};
use super::model::{ArtifactBundle, Classifier, EngineStatus, InferenceError, RiskClassifier, ScaleError, Scaler};
use super::risk::{classify_with_thresholds, PredictionResult, RiskThresholds};

/// Failure of a single evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("feature scaling failed: {0}")]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// End-to-end churn predictor
#[derive(Debug)]
pub struct ChurnPredictor {
    encoder: FeatureEncoder,
    classifier: RiskClassifier,
    thresholds: RiskThresholds,
}

impl ChurnPredictor {
    /// Wire injected collaborators together. Fails on a schema the encoder
    /// cannot fill.
    pub fn new(
        schema: Arc<ColumnSchema>,
        scaler: Arc<dyn Scaler>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            encoder: FeatureEncoder::new(schema, scaler)?,
            classifier: RiskClassifier::new(classifier),
            thresholds: RiskThresholds::default(),
        })
    }

    /// Build from artifacts loaded at startup
    pub fn from_bundle(bundle: &ArtifactBundle) -> Result<Self, SchemaError> {
        Self::new(
            Arc::clone(&bundle.schema),
            bundle.scaler.clone(),
            bundle.classifier.clone(),
        )
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Full evaluation
    pub fn predict(&self, input: &RawInput) -> Result<PredictionResult, PredictError> {
        self.predict_explained(input).map(|(result, _)| result)
    }

    /// Full evaluation, also returning the encoded vector
    pub fn predict_explained(&self, input: &RawInput) -> Result<(PredictionResult, FeatureVector), PredictError> {
        let start_time = std::time::Instant::now();

        let vector = self.encoder.encode(input)?;
        let probability = self.classifier.churn_probability(&vector)?;
        let (tier, _) = classify_with_thresholds(probability, &self.thresholds);

        let inference_time = start_time.elapsed().as_micros() as u64;

        log::debug!(
            "Prediction: p={:.4} tier={} active={:?}",
            probability,
            tier,
            vector.active_columns()
        );

        Ok((PredictionResult::new(probability, tier, inference_time), vector))
    }

    pub fn schema_info(&self) -> SchemaInfo {
        self.encoder.schema_info()
    }

    pub fn engine_status(&self) -> EngineStatus {
        self.classifier.status()
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }
}
