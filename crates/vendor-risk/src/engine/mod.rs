//! Risk evaluation engine.
//!
//! Pure, synchronous rules shared by the vendor catalog, assessment, due-diligence,
//! security-monitoring and scorecard views: score normalization and tiering,
//! (weighted) aggregation, obligation alerting, workflow completion and monthly trends.
//! Nothing in here performs I/O or keeps state between calls.

mod aggregator;
mod alerts;
mod completion;
mod error;
mod normalizer;
mod trend;

#[cfg(test)]
mod tests;

pub use aggregator::{
    aggregate, aggregate_weighted, DimensionScore, RiskDimension, WeightedCategory,
};
pub use alerts::{
    evaluate, parse_date, parse_timestamp, start_of_day, AlertEvaluation, AlertStatus,
    AlertWindow, Obligation, ObligationKind,
};
pub use completion::{
    overall_status, percent_complete, StepStatus, Workflow, WorkflowStatus, WorkflowStep,
};
pub use error::EngineError;
pub use normalizer::{clamp, classify_tier, RiskTier, TierThresholds, SCORE_MAX, SCORE_MIN};
pub use trend::{fold_by_month, MonthKey, PeriodRecord, TrendReducer};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Alert windows per obligation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertWindows {
    pub contract: AlertWindow,
    pub assessment: AlertWindow,
    pub follow_up: AlertWindow,
    pub certification: AlertWindow,
}

impl AlertWindows {
    pub fn for_kind(&self, kind: ObligationKind) -> AlertWindow {
        match kind {
            ObligationKind::ContractEnd => self.contract,
            ObligationKind::AssessmentDue => self.assessment,
            ObligationKind::FollowUp => self.follow_up,
            ObligationKind::CertificationExpiry => self.certification,
        }
    }
}

impl Default for AlertWindows {
    fn default() -> Self {
        Self {
            contract: AlertWindow::new(7, 30),
            assessment: AlertWindow::new(7, 30),
            follow_up: AlertWindow::new(3, 14),
            certification: AlertWindow::new(14, 60),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thresholds: TierThresholds,
    pub windows: AlertWindows,
}

/// Overall score of a set of dimensions together with its tier, if anything was assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: Option<u8>,
    pub tier: Option<RiskTier>,
    pub assessed_dimensions: usize,
}

/// Stateless engine binding the rules to a threshold and window configuration.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classify(&self, score: f64) -> RiskTier {
        classify_tier(score, &self.config.thresholds)
    }

    pub fn assess(&self, dimensions: &[DimensionScore]) -> RiskAssessment {
        let score = aggregate(dimensions);
        RiskAssessment {
            score,
            tier: score.map(|score| self.classify(f64::from(score))),
            assessed_dimensions: dimensions
                .iter()
                .filter(|dimension| dimension.value.is_some())
                .count(),
        }
    }

    pub fn weighted_score(
        &self,
        categories: &[WeightedCategory],
    ) -> Result<(u8, RiskTier), EngineError> {
        let score = aggregate_weighted(categories)?;
        Ok((score, self.classify(f64::from(score))))
    }

    /// Obligation for `kind` due on `due_on`, using the configured window.
    pub fn obligation(
        &self,
        kind: ObligationKind,
        label: impl Into<String>,
        due_on: NaiveDate,
    ) -> Obligation {
        Obligation::due_on(kind, label, due_on, self.config.windows.for_kind(kind))
    }

    pub fn evaluate(&self, obligation: &Obligation, now: DateTime<Utc>) -> AlertEvaluation {
        evaluate(obligation, now)
    }
}
