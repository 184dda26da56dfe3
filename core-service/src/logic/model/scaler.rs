//! Scaler - Numeric feature normalization
//!
//! Applies the scaling fitted at training time to the numeric inputs.
//! The fitted parameters come from `scaler.json`:
//!
//! ```json
//! {"kind": "standard", "mean": [32.4, 64.8, 2283.3], "scale": [24.6, 30.1, 2266.8]}
//! {"kind": "min_max", "data_min": [0, 18.25, 18.8], "data_max": [72, 118.75, 8684.8]}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ranges/deviations at or below this are treated as 1.0
const MIN_SCALE: f32 = 1e-10;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("scaler expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid scaler parameters: {0}")]
    InvalidParameters(String),
}

// ============================================================================
// SCALER TRAIT
// ============================================================================

/// Fitted feature scaler (StandardScaler, MinMaxScaler, test doubles)
pub trait Scaler: Send + Sync {
    /// Scale one sample. Output has the same width as the input.
    fn transform(&self, values: &[f32]) -> Result<Vec<f32>, ScaleError>;
}

// ============================================================================
// FITTED PARAMETERS
// ============================================================================

fn default_feature_range() -> (f32, f32) {
    (0.0, 1.0)
}

/// Scaler parameters exported from training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// z = (x - mean) / scale
    Standard { mean: Vec<f32>, scale: Vec<f32> },

    /// x' = (x - min) / (max - min) * (hi - lo) + lo
    MinMax {
        data_min: Vec<f32>,
        data_max: Vec<f32>,
        #[serde(default = "default_feature_range")]
        feature_range: (f32, f32),
    },
}

impl ScalerArtifact {
    /// Number of features this scaler was fitted on
    pub fn feature_count(&self) -> usize {
        match self {
            ScalerArtifact::Standard { mean, .. } => mean.len(),
            ScalerArtifact::MinMax { data_min, .. } => data_min.len(),
        }
    }

    /// Check parameter consistency
    pub fn validate(&self) -> Result<(), ScaleError> {
        match self {
            ScalerArtifact::Standard { mean, scale } => {
                if mean.len() != scale.len() {
                    return Err(ScaleError::InvalidParameters(format!(
                        "mean has {} entries, scale has {}",
                        mean.len(),
                        scale.len()
                    )));
                }
            }
            ScalerArtifact::MinMax { data_min, data_max, feature_range } => {
                if data_min.len() != data_max.len() {
                    return Err(ScaleError::InvalidParameters(format!(
                        "data_min has {} entries, data_max has {}",
                        data_min.len(),
                        data_max.len()
                    )));
                }
                if feature_range.0 >= feature_range.1 {
                    return Err(ScaleError::InvalidParameters(format!(
                        "feature_range ({}, {}) is empty",
                        feature_range.0, feature_range.1
                    )));
                }
            }
        }

        if self.feature_count() == 0 {
            return Err(ScaleError::InvalidParameters("no features".to_string()));
        }

        Ok(())
    }
}

impl Scaler for ScalerArtifact {
    fn transform(&self, values: &[f32]) -> Result<Vec<f32>, ScaleError> {
        let expected = self.feature_count();
        if values.len() != expected {
            return Err(ScaleError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }

        let scaled = match self {
            ScalerArtifact::Standard { mean, scale } => values
                .iter()
                .zip(mean.iter().zip(scale.iter()))
                .map(|(x, (m, s))| {
                    let s = if s.abs() <= MIN_SCALE { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            ScalerArtifact::MinMax { data_min, data_max, feature_range } => {
                let (lo, hi) = *feature_range;
                values
                    .iter()
                    .zip(data_min.iter().zip(data_max.iter()))
                    .map(|(x, (min, max))| {
                        let range = max - min;
                        let range = if range.abs() <= MIN_SCALE { 1.0 } else { range };
                        (x - min) / range * (hi - lo) + lo
                    })
                    .collect()
            }
        };

        Ok(scaled)
    }
}
