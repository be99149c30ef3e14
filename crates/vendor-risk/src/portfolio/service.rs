use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::evaluator::PortfolioEvaluator;
use super::report::PortfolioReport;
use super::source::{
    PortfolioSnapshot, RiskScoreSink, SinkError, SourceError, VendorDataSource, VendorScoreUpdate,
};
use crate::engine::{EngineConfig, EngineError, RiskEngine};

/// Service composing a data source, the evaluator, and the score write-back sink.
pub struct RiskReviewService<S, K> {
    source: Arc<S>,
    sink: Arc<K>,
    evaluator: Arc<PortfolioEvaluator>,
}

impl<S, K> RiskReviewService<S, K>
where
    S: VendorDataSource + 'static,
    K: RiskScoreSink + 'static,
{
    pub fn new(source: Arc<S>, sink: Arc<K>, config: EngineConfig) -> Self {
        let evaluator = Arc::new(PortfolioEvaluator::new(RiskEngine::new(config)));
        Self {
            source,
            sink,
            evaluator,
        }
    }

    pub fn evaluator(&self) -> &PortfolioEvaluator {
        &self.evaluator
    }

    /// Fetch the portfolio, evaluate it at `now`, and persist every vendor's overall score.
    pub fn run(&self, now: DateTime<Utc>) -> Result<PortfolioReport, RiskReviewError> {
        let snapshot = PortfolioSnapshot::fetch(self.source.as_ref())?;
        info!(
            vendors = snapshot.vendors.len(),
            contracts = snapshot.contracts.len(),
            assessments = snapshot.assessments.len(),
            reviews = snapshot.due_diligence.len(),
            incidents = snapshot.incidents.len(),
            scorecards = snapshot.scorecards.len(),
            "fetched vendor portfolio"
        );

        let report = self.evaluator.report(&snapshot, now)?;

        for score in &report.vendor_scores {
            debug!(
                vendor = %score.vendor_id,
                score = ?score.score,
                tier = ?score.tier,
                "recording vendor risk score"
            );
            self.sink.record_vendor_score(VendorScoreUpdate {
                vendor_id: score.vendor_id.clone(),
                overall_risk_score: score.score,
                tier: score.tier,
            })?;
        }

        info!(
            alerts = report.alerts.len(),
            critical = report.critical_alerts(),
            unscored = report.unscored_vendors(),
            "portfolio risk review complete"
        );

        Ok(report)
    }
}

/// Error raised by the risk review service.
#[derive(Debug, thiserror::Error)]
pub enum RiskReviewError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
