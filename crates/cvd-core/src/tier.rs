//! Risk tiers and their presentation table.
//!
//! ```text
//! [0.00, 0.40) -> low
//! [0.40, 0.70) -> moderate
//! [0.70, 1.00] -> high
//! ```

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the moderate tier.
pub const MODERATE_THRESHOLD: f64 = 0.40;

/// Lower bound (inclusive) of the high tier.
pub const HIGH_THRESHOLD: f64 = 0.70;

/// Discrete risk level derived from the model probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Title-case name used in rendered reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Hex color of the gauge bar for this tier.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#6FCF97",
            Self::Moderate => "#F2C94C",
            Self::High => "#EB5757",
        }
    }

    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Low => "You're doing great! Keep maintaining your healthy habits.",
            Self::Moderate => {
                "Consider improving your diet and staying active. Small changes matter!"
            }
            Self::High => {
                "Your risk is high. Please consult your doctor and review your lifestyle."
            }
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a class-1 probability into a tier.
///
/// Boundaries belong to the upper tier. Callers reject non-finite
/// probabilities before this point.
#[must_use]
pub fn classify_tier(probability: f64) -> RiskTier {
    if probability < MODERATE_THRESHOLD {
        RiskTier::Low
    } else if probability < HIGH_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::High
    }
}

/// One colored segment of the percentage gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub tier: RiskTier,
    /// Start percentage, inclusive.
    pub from: f64,
    /// End percentage; exclusive except for the last band.
    pub to: f64,
    pub color: &'static str,
}

pub const GAUGE_BANDS: [GaugeBand; 3] = [
    GaugeBand {
        tier: RiskTier::Low,
        from: 0.0,
        to: 40.0,
        color: "#D4EFDF",
    },
    GaugeBand {
        tier: RiskTier::Moderate,
        from: 40.0,
        to: 70.0,
        color: "#FCF3CF",
    },
    GaugeBand {
        tier: RiskTier::High,
        from: 70.0,
        to: 100.0,
        color: "#F5B7B1",
    },
];

/// Probability as a percentage rounded to one decimal place.
#[must_use]
pub fn display_percent(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}
