use chrono::NaiveDate;
use clap::ValueEnum;
use std::sync::{Arc, Mutex};
use vendor_risk::engine::TierThresholds;
use vendor_risk::portfolio::{RiskScoreSink, SinkError, VendorScoreUpdate};

/// Collects score write-backs so the CLI can report what would have been persisted.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScoreSink {
    updates: Arc<Mutex<Vec<VendorScoreUpdate>>>,
}

impl RiskScoreSink for InMemoryScoreSink {
    fn record_vendor_score(&self, update: VendorScoreUpdate) -> Result<(), SinkError> {
        let mut guard = self
            .updates
            .lock()
            .map_err(|_| SinkError::Unavailable("score sink mutex poisoned".to_string()))?;
        guard.push(update);
        Ok(())
    }
}

impl InMemoryScoreSink {
    pub(crate) fn updates(&self) -> Vec<VendorScoreUpdate> {
        match self.updates.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TierScheme {
    /// low <= 39, medium <= 59, high <= 79
    Standard,
    /// low <= 25, medium <= 50, high <= 75
    Legacy,
}

impl TierScheme {
    pub(crate) fn thresholds(self) -> TierThresholds {
        match self {
            Self::Standard => TierThresholds::STANDARD,
            Self::Legacy => TierThresholds::LEGACY,
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    vendor_risk::engine::parse_date(raw).map_err(|err| format!("{err} (expected YYYY-MM-DD)"))
}
