//! Risk Module
//!
//! Maps the churn probability to Low/Medium/High and a retention action.
//!
//! ## Structure
//! - `types`: RiskTier, PredictionResult
//! - `rules`: Tier cut-offs
//! - `policy`: Classification logic
//!
//! ## Usage
//! ```
//! use churn_core::{classify, RiskTier};
//!
//! let (tier, action) = classify(0.85);
//! assert_eq!(tier, RiskTier::High);
//! assert_eq!(action, "Offer discounts or long-term contract incentives.");
//! ```

pub mod types;
pub mod rules;
pub mod policy;

// Re-export main types for convenience
pub use types::{PredictionResult, RiskTier};
pub use rules::RiskThresholds;
pub use policy::{classify, classify_with_thresholds};
