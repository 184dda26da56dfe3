//! Configuration module

use std::env;
use std::path::PathBuf;

use churn_core::constants::{DEFAULT_COLUMNS_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};
use churn_core::logic::model::artifacts::executable_dir;
use churn_core::{ArtifactError, ArtifactPaths};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the trained artifacts
    pub artifact_dir: PathBuf,

    /// Scaler artifact file name
    pub scaler_file: String,

    /// Classifier artifact file name
    pub model_file: String,

    /// Column schema artifact file name
    pub columns_file: String,

    /// Expected SHA-256 of the classifier artifact
    pub model_sha256: Option<String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ArtifactError> {
        let artifact_dir = match env::var("ARTIFACT_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => executable_dir()?,
        };

        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            artifact_dir,

            scaler_file: env::var("SCALER_FILE")
                .unwrap_or_else(|_| DEFAULT_SCALER_FILE.to_string()),

            model_file: env::var("MODEL_FILE")
                .unwrap_or_else(|_| DEFAULT_MODEL_FILE.to_string()),

            columns_file: env::var("COLUMNS_FILE")
                .unwrap_or_else(|_| DEFAULT_COLUMNS_FILE.to_string()),

            model_sha256: env::var("MODEL_SHA256")
                .ok()
                .filter(|s| !s.trim().is_empty()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Full artifact paths
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            scaler: self.artifact_dir.join(&self.scaler_file),
            model: self.artifact_dir.join(&self.model_file),
            columns: self.artifact_dir.join(&self.columns_file),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            artifact_dir: PathBuf::from("."),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            columns_file: DEFAULT_COLUMNS_FILE.to_string(),
            model_sha256: None,
            environment: "development".to_string(),
        }
    }
}
