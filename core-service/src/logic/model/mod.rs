//! Model Module - AI/ML Inference Engine
//!
//! Scaling, classification and artifact loading, kept apart from feature
//! encoding so the model can be swapped without touching the encoder.

pub mod scaler;
pub mod inference;
pub mod artifacts;

// Re-export common types
pub use scaler::{ScaleError, Scaler, ScalerArtifact};
pub use inference::{Classifier, EngineStatus, InferenceError, OnnxClassifier, RiskClassifier};
pub use artifacts::{ArtifactBundle, ArtifactError, ArtifactPaths, ModelMetadata};
