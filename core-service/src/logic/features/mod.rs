//! Features Module - Feature Encoding Engine
//!
//! Turns the raw form input into the vector layout the trained model expects.
//! The layout itself comes from the column schema artifact.

pub mod input;
pub mod schema;
pub mod vector;
pub mod encoder;


// Re-export common types
pub use input::{Categorical, Contract, InternetService, PaperlessBilling, PaymentMethod, RawInput};
pub use schema::{ColumnSchema, SchemaError, SchemaInfo};
pub use vector::{FeatureVector, NamedFeature};
pub use encoder::FeatureEncoder;
