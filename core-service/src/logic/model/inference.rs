//! Inference Engine - Churn probability from a feature vector
//!
//! [`Classifier`] is the seam to the trained model; [`OnnxClassifier`] runs
//! an exported model through ONNX Runtime. [`RiskClassifier`] is the adapter
//! the pipeline talks to: it picks the churn class out of the per-class
//! probabilities and keeps latency stats.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::POSITIVE_CLASS_INDEX;
use crate::logic::features::FeatureVector;

/// Preferred name of the probability output in exported classifiers
const PROBABILITY_OUTPUT: &str = "probabilities";

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("classifier rejected input of {actual} features (expected {expected})")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("classifier returned {0} class probabilities, need at least 2")]
    MissingClass(usize),

    #[error("classifier returned a non-finite probability")]
    InvalidProbability,

    #[error("inference failed: {0}")]
    Runtime(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trained probabilistic classifier (ONNX, test doubles, ...)
pub trait Classifier: Send + Sync {
    /// Per-class probabilities for one sample: `[p_negative, p_positive]`
    fn predict_probability(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError>;

    /// Backend name for status reporting
    fn device(&self) -> &str {
        "custom"
    }
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Engine status for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStatus {
    pub inference_device: String,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

/// Churn probability for a feature vector
pub struct RiskClassifier {
    classifier: Arc<dyn Classifier>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl RiskClassifier {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Probability of the positive (churn) class, in [0, 1]
    pub fn churn_probability(&self, vector: &FeatureVector) -> Result<f32, InferenceError> {
        let start_time = std::time::Instant::now();

        let classes = self.classifier.predict_probability(vector.as_slice())?;
        let probability = *classes
            .get(POSITIVE_CLASS_INDEX)
            .ok_or(InferenceError::MissingClass(classes.len()))?;

        if !probability.is_finite() {
            return Err(InferenceError::InvalidProbability);
        }

        // Track metrics
        let elapsed = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(probability.clamp(0.0, 1.0))
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            inference_device: self.classifier.device().to_string(),
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}

impl std::fmt::Debug for RiskClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskClassifier")
            .field("device", &self.classifier.device())
            .field("inference_count", &self.inference_count.load(Ordering::Relaxed))
            .finish()
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// Classifier backed by an ONNX Runtime session
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
    feature_count: usize,
}

impl OnnxClassifier {
    /// Load an exported classifier expecting `feature_count` inputs.
    /// Fails when the graph declares a different fixed input width.
    pub fn load(model_path: &Path, feature_count: usize) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| InferenceError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError::Runtime(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == PROBABILITY_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::Runtime("No output defined".to_string()))?;

        let declared_width = session
            .inputs
            .first()
            .and_then(|input| input.input_type.tensor_shape())
            .and_then(|shape| shape.last().copied());
        check_declared_width(declared_width, feature_count)?;

        log::info!(
            "ONNX model loaded successfully ({} features, output '{}')",
            feature_count,
            output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            feature_count,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }
}

/// Compare the graph's last input dimension with the schema width.
/// Dynamic (negative) or unknown dimensions pass.
fn check_declared_width(declared: Option<i64>, feature_count: usize) -> Result<(), InferenceError> {
    match declared {
        Some(width) if width >= 0 && width as usize != feature_count => Err(InferenceError::ShapeMismatch {
            expected: width as usize,
            actual: feature_count,
        }),
        _ => Ok(()),
    }
}

impl Classifier for OnnxClassifier {
    fn predict_probability(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if features.len() != self.feature_count {
            return Err(InferenceError::ShapeMismatch {
                expected: self.feature_count,
                actual: features.len(),
            });
        }

        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError::Runtime(format!("No output '{}'", self.output_name)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Runtime(format!("Extract error: {}", e)))?;

        Ok(output_tensor.1.to_vec())
    }

    fn device(&self) -> &str {
        "ONNX Runtime (CPU)"
    }
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("output_name", &self.output_name)
            .field("feature_count", &self.feature_count)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::ColumnSchema;

    /// Returns fixed class probabilities; rejects any other width
    struct FixedClassifier {
        width: usize,
        output: Vec<f32>,
    }

    impl Classifier for FixedClassifier {
        fn predict_probability(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
            if features.len() != self.width {
                return Err(InferenceError::ShapeMismatch {
                    expected: self.width,
                    actual: features.len(),
                });
            }
            Ok(self.output.clone())
        }
    }

    fn vector(width: usize) -> FeatureVector {
        let names: Vec<String> = (0..width).map(|i| format!("f{}", i)).collect();
        FeatureVector::zeroed(Arc::new(ColumnSchema::new(names).unwrap()))
    }

    fn adapter(width: usize, output: Vec<f32>) -> RiskClassifier {
        RiskClassifier::new(Arc::new(FixedClassifier { width, output }))
    }

    #[test]
    fn test_selects_positive_class() {
        let risk = adapter(4, vec![0.15, 0.85]);
        assert_eq!(risk.churn_probability(&vector(4)), Ok(0.85));
    }

    #[test]
    fn test_shape_rejection_propagates() {
        let risk = adapter(5, vec![0.5, 0.5]);
        assert_eq!(
            risk.churn_probability(&vector(4)),
            Err(InferenceError::ShapeMismatch { expected: 5, actual: 4 })
        );
    }

    #[test]
    fn test_single_class_output_rejected() {
        let risk = adapter(4, vec![0.3]);
        assert_eq!(risk.churn_probability(&vector(4)), Err(InferenceError::MissingClass(1)));
    }

    #[test]
    fn test_nan_rejected() {
        let risk = adapter(4, vec![0.0, f32::NAN]);
        assert_eq!(risk.churn_probability(&vector(4)), Err(InferenceError::InvalidProbability));
    }

    #[test]
    fn test_status_counts_successes() {
        let risk = adapter(4, vec![0.6, 0.4]);
        assert_eq!(risk.status().inference_count, 0);

        risk.churn_probability(&vector(4)).unwrap();
        risk.churn_probability(&vector(4)).unwrap();
        let _ = risk.churn_probability(&vector(3));

        let status = risk.status();
        assert_eq!(status.inference_count, 2);
        assert_eq!(status.inference_device, "custom");
        assert!(status.avg_latency_ms >= 0.0);
    }

    #[test]
    fn test_declared_width_must_match_schema() {
        assert_eq!(check_declared_width(Some(9), 9), Ok(()));
        assert_eq!(
            check_declared_width(Some(12), 9),
            Err(InferenceError::ShapeMismatch { expected: 12, actual: 9 })
        );
    }

    #[test]
    fn test_dynamic_width_accepted() {
        assert_eq!(check_declared_width(Some(-1), 9), Ok(()));
        assert_eq!(check_declared_width(None, 9), Ok(()));
    }
}
