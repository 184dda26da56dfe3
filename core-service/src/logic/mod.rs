//! Logic Module - Business Logic & Engines
//!
//! ## Layout
//! - `features/` - Raw input, column schema, feature vector, encoder
//! - `model/` - Scaler, classifier adapter (ONNX), artifact loading
//! - `risk/` - Probability → risk tier + recommended action
//! - `pipeline` - Wires the three stages together

pub mod features;
pub mod model;
pub mod risk;
pub mod pipeline;
