//! Feature Encoder - RawInput → FeatureVector
//!
//! 1. Start from an all-zero vector over the column schema
//! 2. Scale `[tenure, monthlyCharges, totalCharges]` and write them to the
//!    numeric columns
//! 3. One-hot each categorical field with drop-first: the baseline category
//!    writes nothing, any other category writes 1 to `"{Field}_{Label}"` if
//!    the schema has that column
//!
//! Base columns are resolved once in [`FeatureEncoder::new`], so a schema
//! without them fails at startup and never per request.

use std::sync::Arc;

use super::input::{Categorical, Contract, InternetService, PaperlessBilling, PaymentMethod, RawInput};
use super::schema::{ColumnSchema, SchemaError, SchemaInfo};
use super::vector::FeatureVector;
use crate::logic::model::scaler::{ScaleError, Scaler};

const NUMERIC_WIDTH: usize = 3;

/// Builds classifier-ready feature vectors
pub struct FeatureEncoder {
    schema: Arc<ColumnSchema>,
    scaler: Arc<dyn Scaler>,
    numeric_indices: [usize; NUMERIC_WIDTH],
    unmapped: Vec<String>,
}

impl FeatureEncoder {
    /// Bind a scaler to a schema. Fails if a numeric base column is missing.
    pub fn new(schema: Arc<ColumnSchema>, scaler: Arc<dyn Scaler>) -> Result<Self, SchemaError> {
        let numeric_indices = schema.numeric_indices()?;
        let unmapped = unmapped_categories(&schema);

        if !unmapped.is_empty() {
            log::warn!(
                "Schema {:08x} has no column for {} selectable categories (encoded as baseline): {:?}",
                schema.hash(),
                unmapped.len(),
                unmapped
            );
        }

        Ok(Self {
            schema,
            scaler,
            numeric_indices,
            unmapped,
        })
    }

    pub fn schema(&self) -> &Arc<ColumnSchema> {
        &self.schema
    }

    /// Non-baseline categories whose column the schema lacks
    pub fn unmapped_categories(&self) -> &[String] {
        &self.unmapped
    }

    pub fn schema_info(&self) -> SchemaInfo {
        SchemaInfo::new(&self.schema, self.unmapped.clone())
    }

    /// Encode one input. Deterministic: same input, same vector.
    pub fn encode(&self, input: &RawInput) -> Result<FeatureVector, ScaleError> {
        let mut vector = FeatureVector::zeroed(Arc::clone(&self.schema));

        let scaled = self.scaler.transform(&input.numeric_features())?;
        if scaled.len() != NUMERIC_WIDTH {
            return Err(ScaleError::DimensionMismatch {
                expected: NUMERIC_WIDTH,
                actual: scaled.len(),
            });
        }
        for (index, value) in self.numeric_indices.iter().zip(scaled) {
            vector.set(*index, value);
        }

        self.one_hot(&mut vector, input.contract);
        self.one_hot(&mut vector, input.internet_service);
        self.one_hot(&mut vector, input.payment_method);
        self.one_hot(&mut vector, input.paperless_billing);

        Ok(vector)
    }

    fn one_hot<C: Categorical>(&self, vector: &mut FeatureVector, value: C) {
        let Some(column) = value.one_hot_column() else {
            return;
        };
        if !vector.set_by_name(&column, 1.0) {
            log::debug!("No column '{}' in schema, {} encoded as baseline", column, C::FIELD);
        }
    }
}

impl std::fmt::Debug for FeatureEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEncoder")
            .field("schema_hash", &format_args!("{:08x}", self.schema.hash()))
            .field("columns", &self.schema.len())
            .field("numeric_indices", &self.numeric_indices)
            .field("unmapped", &self.unmapped)
            .finish()
    }
}

/// Candidate columns of every non-baseline category missing from the schema
pub fn unmapped_categories(schema: &ColumnSchema) -> Vec<String> {
    let mut missing = Vec::new();
    collect_unmapped::<Contract>(schema, &mut missing);
    collect_unmapped::<InternetService>(schema, &mut missing);
    collect_unmapped::<PaymentMethod>(schema, &mut missing);
    collect_unmapped::<PaperlessBilling>(schema, &mut missing);
    missing
}

fn collect_unmapped<C: Categorical>(schema: &ColumnSchema, missing: &mut Vec<String>) {
    missing.extend(
        C::variants()
            .iter()
            .filter_map(C::one_hot_column)
            .filter(|column| !schema.contains(column)),
    );
}
