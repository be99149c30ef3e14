use super::error::EngineError;
use super::normalizer::{clamp, round_score};
use serde::{Deserialize, Serialize};

/// The six axes of a vendor risk assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDimension {
    Financial,
    Operational,
    Compliance,
    Security,
    Reputational,
    Strategic,
}

impl RiskDimension {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Financial,
            Self::Operational,
            Self::Compliance,
            Self::Security,
            Self::Reputational,
            Self::Strategic,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Financial => "Financial",
            Self::Operational => "Operational",
            Self::Compliance => "Compliance",
            Self::Security => "Security",
            Self::Reputational => "Reputational",
            Self::Strategic => "Strategic",
        }
    }
}

/// One assessed axis. `None` means the dimension has not been assessed yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: RiskDimension,
    pub value: Option<f64>,
}

impl DimensionScore {
    pub fn new(dimension: RiskDimension, value: Option<f64>) -> Self {
        Self { dimension, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCategory {
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

impl WeightedCategory {
    pub fn new(name: impl Into<String>, weight: f64, score: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            score,
        }
    }
}

/// Rounded mean of the assessed dimensions, or `None` when nothing has been assessed.
pub fn aggregate(dimensions: &[DimensionScore]) -> Option<u8> {
    let (count, total) = dimensions
        .iter()
        .filter_map(|dimension| dimension.value)
        .fold((0usize, 0.0f64), |(count, total), value| {
            (count + 1, total + clamp(value))
        });

    if count == 0 {
        return None;
    }

    Some(round_score(total / count as f64))
}

pub fn aggregate_weighted(categories: &[WeightedCategory]) -> Result<u8, EngineError> {
    let mut weighted_total = 0.0;
    let mut total_weight = 0.0;

    for category in categories {
        if !category.weight.is_finite() || category.weight < 0.0 {
            return Err(EngineError::InvalidWeight {
                category: category.name.clone(),
                weight: category.weight,
            });
        }

        weighted_total += clamp(category.score) * category.weight;
        total_weight += category.weight;
    }

    if total_weight == 0.0 {
        return Ok(0);
    }

    Ok(round_score(weighted_total / total_weight))
}
