use super::error::EngineError;
use serde::{Deserialize, Serialize};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Coarse risk classification derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Inclusive upper bounds for the low, medium and high tiers. Anything above
/// `high_max` is critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdBounds")]
pub struct TierThresholds {
    pub low_max: f64,
    pub medium_max: f64,
    pub high_max: f64,
}

impl TierThresholds {
    /// Low up to 39, medium 40-59, high 60-79, critical from 80.
    pub const STANDARD: Self = Self {
        low_max: 39.0,
        medium_max: 59.0,
        high_max: 79.0,
    };

    /// Scheme still used by the assessment screens: 25 / 50 / 75.
    pub const LEGACY: Self = Self {
        low_max: 25.0,
        medium_max: 50.0,
        high_max: 75.0,
    };

    pub fn new(low_max: f64, medium_max: f64, high_max: f64) -> Result<Self, EngineError> {
        let finite = low_max.is_finite() && medium_max.is_finite() && high_max.is_finite();
        if !finite || low_max >= medium_max || medium_max >= high_max {
            return Err(EngineError::InvalidThresholds {
                low_max,
                medium_max,
                high_max,
            });
        }

        Ok(Self {
            low_max,
            medium_max,
            high_max,
        })
    }
}

/// Unchecked wire form; deserialized thresholds go through [`TierThresholds::new`].
#[derive(Deserialize)]
struct ThresholdBounds {
    low_max: f64,
    medium_max: f64,
    high_max: f64,
}

impl TryFrom<ThresholdBounds> for TierThresholds {
    type Error = EngineError;

    fn try_from(bounds: ThresholdBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.low_max, bounds.medium_max, bounds.high_max)
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Constrain a raw score to the 0-100 range. NaN is treated as zero.
pub fn clamp(score: f64) -> f64 {
    if score.is_nan() {
        SCORE_MIN
    } else {
        score.clamp(SCORE_MIN, SCORE_MAX)
    }
}

pub fn classify_tier(score: f64, thresholds: &TierThresholds) -> RiskTier {
    let score = clamp(score);
    if score <= thresholds.low_max {
        RiskTier::Low
    } else if score <= thresholds.medium_max {
        RiskTier::Medium
    } else if score <= thresholds.high_max {
        RiskTier::High
    } else {
        RiskTier::Critical
    }
}

/// Round half-up to a whole-number score.
pub(crate) fn round_score(value: f64) -> u8 {
    clamp(value).round() as u8
}
