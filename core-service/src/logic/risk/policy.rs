//! Risk Policy
//!
//! Pure, total mapping from churn probability to a risk tier and its
//! recommended action. No state carried between calls.

use super::rules::RiskThresholds;
use super::types::RiskTier;

/// Tier and action for a probability, default cut-offs
pub fn classify(probability: f32) -> (RiskTier, &'static str) {
    classify_with_thresholds(probability, &RiskThresholds::default())
}

/// Tier and action for a probability, custom cut-offs
///
/// `p > high_min` → High, `medium_min < p <= high_min` → Medium, else Low.
/// NaN compares false everywhere and lands in Low.
pub fn classify_with_thresholds(probability: f32, thresholds: &RiskThresholds) -> (RiskTier, &'static str) {
    let tier = if probability > thresholds.high_min {
        RiskTier::High
    } else if probability > thresholds.medium_min {
        RiskTier::Medium
    } else {
        RiskTier::Low
    };

    (tier, tier.recommended_action())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_boundary_is_medium() {
        assert_eq!(classify(0.70).0, RiskTier::Medium);
        assert_eq!(classify(0.700001).0, RiskTier::High);
    }

    #[test]
    fn test_medium_boundary_is_low() {
        assert_eq!(classify(0.40).0, RiskTier::Low);
        assert_eq!(classify(0.40001).0, RiskTier::Medium);
    }

    #[test]
    fn test_actions() {
        assert_eq!(classify(0.85), (RiskTier::High, "Offer discounts or long-term contract incentives."));
        assert_eq!(classify(0.55), (RiskTier::Medium, "Improve engagement & customer support."));
        assert_eq!(classify(0.10), (RiskTier::Low, "Focus on loyalty programs & upselling."));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(0.0).0, RiskTier::Low);
        assert_eq!(classify(1.0).0, RiskTier::High);
        assert_eq!(classify(f32::NAN).0, RiskTier::Low);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = RiskThresholds { high_min: 0.5, medium_min: 0.2 };
        assert_eq!(classify_with_thresholds(0.55, &strict).0, RiskTier::High);
        assert_eq!(classify_with_thresholds(0.5, &strict).0, RiskTier::Medium);
        assert_eq!(classify_with_thresholds(0.2, &strict).0, RiskTier::Low);
    }

    #[test]
    fn test_no_memory_between_calls() {
        let first = classify(0.69);
        classify(0.95);
        assert_eq!(classify(0.69), first);
    }
}
