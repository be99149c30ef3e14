use serde::{Deserialize, Serialize};

use super::domain::{
    Assessment, Contract, DueDiligenceReview, Incident, Scorecard, Vendor, VendorId,
};
use crate::engine::RiskTier;

/// Read side of the backend store. Implementations resolve foreign keys before
/// handing records over.
pub trait VendorDataSource: Send + Sync {
    fn vendors(&self) -> Result<Vec<Vendor>, SourceError>;
    fn contracts(&self) -> Result<Vec<Contract>, SourceError>;
    fn assessments(&self) -> Result<Vec<Assessment>, SourceError>;
    fn due_diligence(&self) -> Result<Vec<DueDiligenceReview>, SourceError>;
    fn incidents(&self) -> Result<Vec<Incident>, SourceError>;
    fn scorecards(&self) -> Result<Vec<Scorecard>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Write-back hook for computed vendor scores.
pub trait RiskScoreSink: Send + Sync {
    fn record_vendor_score(&self, update: VendorScoreUpdate) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorScoreUpdate {
    pub vendor_id: VendorId,
    pub overall_risk_score: Option<u8>,
    pub tier: Option<RiskTier>,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("vendor {0} not found")]
    NotFound(VendorId),
    #[error("score sink unavailable: {0}")]
    Unavailable(String),
}

/// Everything the evaluator needs, fetched in one pass.
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    pub vendors: Vec<Vendor>,
    pub contracts: Vec<Contract>,
    pub assessments: Vec<Assessment>,
    pub due_diligence: Vec<DueDiligenceReview>,
    pub incidents: Vec<Incident>,
    pub scorecards: Vec<Scorecard>,
}

impl PortfolioSnapshot {
    pub fn fetch<S: VendorDataSource + ?Sized>(source: &S) -> Result<Self, SourceError> {
        Ok(Self {
            vendors: source.vendors()?,
            contracts: source.contracts()?,
            assessments: source.assessments()?,
            due_diligence: source.due_diligence()?,
            incidents: source.incidents()?,
            scorecards: source.scorecards()?,
        })
    }

    pub fn vendor_name(&self, id: &VendorId) -> Option<&str> {
        self.vendors
            .iter()
            .find(|vendor| &vendor.id == id)
            .map(|vendor| vendor.name.as_str())
    }
}
