//! Artifact Loading - Scaler, classifier and column schema from disk
//!
//! The three training artifacts are loaded once at startup and shared
//! read-only afterwards. By default they sit next to the running executable:
//!
//! ```text
//! <exe dir>/
//! ├── scaler.json          fitted scaler parameters
//! ├── churn_model.onnx     exported classifier
//! └── model_columns.json   ordered feature column names
//! ```
//!
//! Every file is fingerprinted (SHA-256) when loaded so the running model
//! can be traced back to the exact artifacts.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::inference::{InferenceError, OnnxClassifier};
use super::scaler::{ScaleError, ScalerArtifact};
use crate::constants::{DEFAULT_COLUMNS_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE, NUMERIC_COLUMNS};
use crate::logic::features::{ColumnSchema, SchemaError};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid column schema in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("invalid scaler in {path}: {source}")]
    Scaler {
        path: PathBuf,
        #[source]
        source: ScaleError,
    },

    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error(transparent)]
    Model(#[from] InferenceError),

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("cannot locate executable directory: {0}")]
    ExecutableDir(String),
}

// ============================================================================
// PATHS
// ============================================================================

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub model: PathBuf,
    pub columns: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            scaler: dir.join(DEFAULT_SCALER_FILE),
            model: dir.join(DEFAULT_MODEL_FILE),
            columns: dir.join(DEFAULT_COLUMNS_FILE),
        }
    }

    /// Default file names next to the running executable
    pub fn beside_executable() -> Result<Self, ArtifactError> {
        Ok(Self::in_dir(executable_dir()?))
    }
}

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf, ArtifactError> {
    let exe = std::env::current_exe().map_err(|e| ArtifactError::ExecutableDir(e.to_string()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ArtifactError::ExecutableDir(format!("{} has no parent", exe.display())))
}

// ============================================================================
// LOADERS
// ============================================================================

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the column schema (JSON array of names)
pub fn load_column_schema(path: &Path) -> Result<ColumnSchema, ArtifactError> {
    let columns: Vec<String> = read_json(path)?;
    let schema = ColumnSchema::new(columns).map_err(|source| ArtifactError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Column schema loaded: {} columns (hash {:08x})", schema.len(), schema.hash());
    Ok(schema)
}

/// Load the fitted scaler. It must cover exactly the numeric base columns.
pub fn load_scaler(path: &Path) -> Result<ScalerArtifact, ArtifactError> {
    let scaler: ScalerArtifact = read_json(path)?;
    let invalid = |source| ArtifactError::Scaler {
        path: path.to_path_buf(),
        source,
    };

    scaler.validate().map_err(invalid)?;
    if scaler.feature_count() != NUMERIC_COLUMNS.len() {
        return Err(invalid(ScaleError::DimensionMismatch {
            expected: NUMERIC_COLUMNS.len(),
            actual: scaler.feature_count(),
        }));
    }

    log::info!("Scaler loaded from: {}", path.display());
    Ok(scaler)
}

// ============================================================================
// CHECKSUMS
// ============================================================================

/// SHA-256 of a file, lowercase hex
pub fn file_sha256(path: &Path) -> Result<String, ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = fs::File::open(path).map_err(io_err)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(io_err)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Fail unless the file hashes to `expected` (hex, case-insensitive)
pub fn verify_checksum(path: &Path, expected: &str) -> Result<String, ArtifactError> {
    let actual = file_sha256(path)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(ArtifactError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.trim().to_lowercase(),
            actual,
        });
    }
    Ok(actual)
}

// ============================================================================
// BUNDLE
// ============================================================================

/// What was loaded, from where, and when
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub paths: ArtifactPaths,
    pub scaler_sha256: String,
    pub model_sha256: String,
    pub columns_sha256: String,
    pub column_count: usize,
    pub schema_hash: u32,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// The three loaded artifacts, ready to inject into the predictor
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub schema: Arc<ColumnSchema>,
    pub scaler: Arc<ScalerArtifact>,
    pub classifier: Arc<OnnxClassifier>,
    pub metadata: ModelMetadata,
}

impl ArtifactBundle {
    /// Load schema, scaler and classifier. Any failure is fatal.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let schema = load_column_schema(&paths.columns)?;
        let scaler = load_scaler(&paths.scaler)?;
        if !paths.model.is_file() {
            return Err(ArtifactError::ModelNotFound(paths.model.clone()));
        }
        let classifier = OnnxClassifier::load(&paths.model, schema.len())?;

        let metadata = ModelMetadata {
            paths: paths.clone(),
            scaler_sha256: file_sha256(&paths.scaler)?,
            model_sha256: file_sha256(&paths.model)?,
            columns_sha256: file_sha256(&paths.columns)?,
            column_count: schema.len(),
            schema_hash: schema.hash(),
            loaded_at: chrono::Utc::now(),
        };

        log::info!(
            "Artifacts loaded (model sha256 {}, {} columns)",
            metadata.model_sha256,
            metadata.column_count
        );

        Ok(Self {
            schema: Arc::new(schema),
            scaler: Arc::new(scaler),
            classifier: Arc::new(classifier),
            metadata,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_in_dir_uses_default_names() {
        let paths = ArtifactPaths::in_dir("/opt/churn");
        assert_eq!(paths.scaler, PathBuf::from("/opt/churn/scaler.json"));
        assert_eq!(paths.model, PathBuf::from("/opt/churn/churn_model.onnx"));
        assert_eq!(paths.columns, PathBuf::from("/opt/churn/model_columns.json"));
    }

    #[test]
    fn test_beside_executable() {
        let paths = ArtifactPaths::beside_executable().unwrap();
        let dir = executable_dir().unwrap();
        assert_eq!(paths.model, dir.join(DEFAULT_MODEL_FILE));
    }

    #[test]
    fn test_load_column_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "model_columns.json",
            r#"["tenure", "MonthlyCharges", "TotalCharges", "Contract_One year"]"#,
        );

        let schema = load_column_schema(&path).unwrap();
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.index_of("Contract_One year"), Some(3));
    }

    #[test]
    fn test_load_column_schema_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "model_columns.json", r#"["tenure", "tenure"]"#);

        let err = load_column_schema(&path).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::Schema { source: SchemaError::DuplicateColumn(_), .. }
        ));
    }

    #[test]
    fn test_load_column_schema_not_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "model_columns.json", "not json");
        assert!(matches!(load_column_schema(&path), Err(ArtifactError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_column_schema(Path::new("/nonexistent/model_columns.json"));
        assert!(matches!(result, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_load_scaler() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "scaler.json",
            r#"{"kind": "standard", "mean": [32.4, 64.8, 2283.3], "scale": [24.6, 30.1, 2266.8]}"#,
        );

        let scaler = load_scaler(&path).unwrap();
        assert_eq!(scaler.feature_count(), 3);
    }

    #[test]
    fn test_load_scaler_wrong_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "scaler.json",
            r#"{"kind": "standard", "mean": [1.0, 2.0], "scale": [1.0, 1.0]}"#,
        );

        let err = load_scaler(&path).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::Scaler {
                source: ScaleError::DimensionMismatch { expected: 3, actual: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_file_sha256() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.txt", "abc");

        assert_eq!(
            file_sha256(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.txt", "abc");

        let upper = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";
        assert!(verify_checksum(&path, upper).is_ok());

        let err = verify_checksum(&path, "deadbeef").unwrap_err();
        assert!(matches!(err, ArtifactError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_bundle_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            DEFAULT_COLUMNS_FILE,
            r#"["tenure", "MonthlyCharges", "TotalCharges"]"#,
        );
        write_file(
            dir.path(),
            DEFAULT_SCALER_FILE,
            r#"{"kind": "standard", "mean": [0, 0, 0], "scale": [1, 1, 1]}"#,
        );

        let err = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::ModelNotFound(path) if path.ends_with(DEFAULT_MODEL_FILE)));
    }
}
