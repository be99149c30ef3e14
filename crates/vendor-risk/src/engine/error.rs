use super::completion::StepStatus;

/// Failures raised by the risk evaluation engine.
///
/// Only caller programming errors and unparseable dates surface here; noisy scores are
/// clamped rather than rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("category '{category}' has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { category: String, weight: f64 },
    #[error("could not interpret '{value}' as a date")]
    InvalidDate { value: String },
    #[error(
        "tier thresholds must be finite and strictly ascending (low {low_max}, medium {medium_max}, high {high_max})"
    )]
    InvalidThresholds {
        low_max: f64,
        medium_max: f64,
        high_max: f64,
    },
    #[error("workflow step '{step}' cannot move from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        step: String,
        from: StepStatus,
        to: StepStatus,
    },
    #[error("workflow step '{0}' not found")]
    StepNotFound(String),
}

impl EngineError {
    pub(crate) fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}
