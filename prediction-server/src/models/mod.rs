//! API models

pub mod prediction;

pub use prediction::{ExplainedPrediction, ModelStatus};
