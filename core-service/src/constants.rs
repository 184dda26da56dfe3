//! Central Configuration Constants
//!
//! Single source of truth for artifact names, base columns and risk cut-offs.
//! To change a default, only edit this file.

/// Default scaler artifact file name
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Default classifier artifact file name
pub const DEFAULT_MODEL_FILE: &str = "churn_model.onnx";

/// Default column schema artifact file name
pub const DEFAULT_COLUMNS_FILE: &str = "model_columns.json";

// ============================================
// Feature schema
// ============================================

/// Numeric columns filled from the scaler output, in scaler order
pub const NUMERIC_COLUMNS: [&str; 3] = ["tenure", "MonthlyCharges", "TotalCharges"];

/// Class index of the churn probability in the classifier output
pub const POSITIVE_CLASS_INDEX: usize = 1;

// ============================================
// Risk tiers
// ============================================

/// Above this probability = High risk
pub const HIGH_RISK_THRESHOLD: f32 = 0.70;

/// Above this probability (up to HIGH_RISK_THRESHOLD) = Medium risk
pub const MEDIUM_RISK_THRESHOLD: f32 = 0.40;

/// Library name
pub const APP_NAME: &str = "Customer Churn Prediction";
