//! Prediction response types handed to the presentation layer.

use serde::Serialize;

use crate::tier::{GAUGE_BANDS, GaugeBand, RiskTier, classify_tier, display_percent};

/// Class-1 probability and the tier it falls into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub risk_tier: RiskTier,
}

impl PredictionResult {
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            risk_tier: classify_tier(probability),
        }
    }
}

/// Everything the presentation layer renders for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub probability: f64,
    /// Probability as a percentage rounded to one decimal.
    pub percent: f64,
    pub risk_tier: RiskTier,
    pub color: &'static str,
    pub guidance: &'static str,
    pub gauge: [GaugeBand; 3],
}

impl From<PredictionResult> for PredictionReport {
    fn from(result: PredictionResult) -> Self {
        Self {
            probability: result.probability,
            percent: display_percent(result.probability),
            risk_tier: result.risk_tier,
            color: result.risk_tier.color(),
            guidance: result.risk_tier.guidance(),
            gauge: GAUGE_BANDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn report_carries_tier_presentation() {
        let report = PredictionReport::from(PredictionResult::from_probability(0.734));
        assert_eq!(report.risk_tier, RiskTier::High);
        assert_eq!(report.color, "#EB5757");
        assert!((report.percent - 73.4).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_snake_case_tier() {
        let report = PredictionReport::from(PredictionResult::from_probability(0.4));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["risk_tier"], "moderate");
        assert_eq!(value["gauge"].as_array().map(Vec::len), Some(3));
    }
}
