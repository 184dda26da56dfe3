//! Risk Types
//!
//! Core types for risk classification. No logic here, only data.

use serde::{Deserialize, Serialize};

// ============================================================================
// RISK TIER
// ============================================================================

/// Churn risk levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Loyal customer, grow the relationship
    Low,
    /// Wavering, needs attention
    Medium,
    /// Likely to leave, act now
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Headline shown on the result panel
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk of Churn",
            RiskTier::Medium => "Medium Risk of Churn",
            RiskTier::High => "High Risk of Churn",
        }
    }

    /// Recommended retention action
    pub fn recommended_action(&self) -> &'static str {
        match self {
            RiskTier::Low => "Focus on loyalty programs & upselling.",
            RiskTier::Medium => "Improve engagement & customer support.",
            RiskTier::High => "Offer discounts or long-term contract incentives.",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// What the result panel shows. Derived per evaluation, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Churn probability (0.0 - 1.0)
    pub probability: f32,
    /// Truncated percentage for the progress bar
    pub probability_percent: u8,
    pub risk_tier: RiskTier,
    pub label: String,
    pub recommended_action: String,
    /// Microseconds
    pub inference_time_us: u64,
}

impl PredictionResult {
    pub fn new(probability: f32, risk_tier: RiskTier, inference_time_us: u64) -> Self {
        Self {
            probability,
            probability_percent: probability_percent(probability),
            risk_tier,
            label: risk_tier.label().to_string(),
            recommended_action: risk_tier.recommended_action().to_string(),
            inference_time_us,
        }
    }
}

/// `floor(p * 100)`, clamped to 0..=100
pub fn probability_percent(probability: f32) -> u8 {
    (probability * 100.0).floor().clamp(0.0, 100.0) as u8
}
