//! Feature Vector - Core data structure for ML input
//!
//! **Schema-bound feature vector**
//!
//! A vector is always created from a [`ColumnSchema`] and carries one value
//! per column, in schema order. Columns cannot be added or removed, so the
//! key set always equals the schema.

use std::sync::Arc;

use serde::Serialize;

use super::schema::ColumnSchema;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Feature vector bound to a column schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: Arc<ColumnSchema>,
    values: Vec<f32>,
}

/// Single named value, used when exposing a vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedFeature {
    pub name: String,
    pub value: f32,
}

impl FeatureVector {
    /// Create a zeroed vector for a schema
    pub fn zeroed(schema: Arc<ColumnSchema>) -> Self {
        let values = vec![0.0; schema.len()];
        Self { schema, values }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Hash of the schema this vector was built against
    pub fn schema_hash(&self) -> u32 {
        self.schema.hash()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get values as slice (classifier input order)
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        self.schema.index_of(name).and_then(|i| self.get(i))
    }

    /// Set feature by index. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Set feature by name. Returns false if the schema has no such column.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = self.schema.index_of(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// (name, value) pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.schema
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Names of the columns with a non-zero value
    pub fn active_columns(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, value)| *value != 0.0)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn to_named(&self) -> Vec<NamedFeature> {
        self.iter()
            .map(|(name, value)| NamedFeature {
                name: name.to_string(),
                value,
            })
            .collect()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "schema_hash": self.schema_hash(),
            "values": self.values,
            "named_values": self.iter()
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
