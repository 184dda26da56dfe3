//! Risk Tier Thresholds
//!
//! Cut-offs only; the tiering itself lives in `policy`.

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// Tier cut-offs. A probability equal to a cut-off falls in the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholds {
    /// Above this = High
    pub high_min: f32,
    /// Above this (up to `high_min`) = Medium, at or below = Low
    pub medium_min: f32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_min: HIGH_RISK_THRESHOLD,
            medium_min: MEDIUM_RISK_THRESHOLD,
        }
    }
}
