//! Column Schema - Feature layout expected by the classifier
//!
//! **CRITICAL: The schema is the contract with the trained model**
//!
//! - Loaded once from the training artifact, never mutated afterwards
//! - Column order = position in the feature vector
//! - Every name appears exactly once
//!
//! A CRC32 hash over the ordered names identifies the layout in logs and
//! API responses.

use std::collections::HashMap;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::NUMERIC_COLUMNS;

// ============================================================================
// ERRORS
// ============================================================================

/// Schema does not fit the encoder. Always a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema mismatch: required column '{0}' is missing")]
    MissingColumn(String),

    #[error("schema contains duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("schema contains an empty column name at position {0}")]
    EmptyColumnName(usize),
}

// ============================================================================
// COLUMN SCHEMA
// ============================================================================

/// Ordered, unique column names of the feature vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    hash: u32,
}

impl ColumnSchema {
    /// Build a schema, rejecting duplicate or empty names
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(columns.len());

        for (position, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyColumnName(position));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        let hash = compute_schema_hash(&columns);

        Ok(Self { columns, index, hash })
    }

    /// Number of columns (= feature vector width)
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column name at a position
    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    /// CRC32 of the ordered column names
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Position of a column that must exist
    pub fn require(&self, name: &str) -> Result<usize, SchemaError> {
        self.index_of(name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    }

    /// Positions of the scaled numeric columns, in scaler order
    pub fn numeric_indices(&self) -> Result<[usize; 3], SchemaError> {
        Ok([
            self.require(NUMERIC_COLUMNS[0])?,
            self.require(NUMERIC_COLUMNS[1])?,
            self.require(NUMERIC_COLUMNS[2])?,
        ])
    }
}

// ============================================================================
// SCHEMA HASH
// ============================================================================

/// Compute CRC32 hash of an ordered column list
pub fn compute_schema_hash(columns: &[String]) -> u32 {
    let mut hasher = Hasher::new();

    for name in columns {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// SCHEMA INFO
// ============================================================================

/// Schema summary for serialization/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInfo {
    pub hash: u32,
    pub column_count: usize,
    pub column_names: Vec<String>,
    /// Selectable categories the schema has no column for
    pub unmapped_categories: Vec<String>,
}

impl SchemaInfo {
    pub fn new(schema: &ColumnSchema, unmapped_categories: Vec<String>) -> Self {
        Self {
            hash: schema.hash(),
            column_count: schema.len(),
            column_names: schema.names().to_vec(),
            unmapped_categories,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
