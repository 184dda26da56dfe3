//! Customer Churn Prediction - Core Library
//!
//! Turns a handful of customer attributes into a churn probability and a
//! risk tier with a recommended retention action.
//!
//! ## Pipeline
//! ```text
//! RawInput ──► FeatureEncoder ──► RiskClassifier ──► risk::classify ──► PredictionResult
//!                 │ (Scaler)          │ (Classifier)
//!                 ▼                   ▼
//!            ColumnSchema        ONNX session
//! ```
//!
//! The three trained artifacts are loaded once by [`ArtifactBundle::load`]
//! and handed to [`ChurnPredictor::new`]; nothing is global.

pub mod constants;
pub mod logic;

pub use logic::features::{
    ColumnSchema, Contract, FeatureEncoder, FeatureVector, InternetService, PaperlessBilling,
    PaymentMethod, RawInput, SchemaError, SchemaInfo,
};
pub use logic::model::{
    ArtifactBundle, ArtifactError, ArtifactPaths, Classifier, EngineStatus, InferenceError,
    ModelMetadata, OnnxClassifier, RiskClassifier, ScaleError, Scaler, ScalerArtifact,
};
pub use logic::pipeline::{ChurnPredictor, PredictError};
pub use logic::risk::{classify, classify_with_thresholds, PredictionResult, RiskThresholds, RiskTier};
