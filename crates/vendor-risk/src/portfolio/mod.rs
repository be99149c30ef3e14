//! Vendor-management adapters around the risk engine.
//!
//! Each screen-level rule (vendor catalog scores, contract expiry, assessment and
//! due-diligence progress, scorecards, incident trends) becomes a thin mapping from a
//! typed record onto the engine, fed by a [`VendorDataSource`] and written back through
//! a [`RiskScoreSink`].

pub mod domain;
mod evaluator;
pub mod import;
pub mod report;
pub mod sample;
mod service;
pub mod source;

pub use domain::{
    Assessment, AssessmentKind, Contract, DueDiligenceChecklist, DueDiligenceReview, Incident,
    IncidentSeverity, RiskProfile, Scorecard, Vendor, VendorId, VendorStatus,
};
pub use evaluator::PortfolioEvaluator;
pub use import::{RegisterDataSource, RegisterImportError, RegisterImporter};
pub use report::{
    AlertSeverity, ObligationAlert, PortfolioReport, ScorecardResult, VendorRiskScore,
    WorkflowProgress,
};
pub use sample::SampleDataProvider;
pub use service::{RiskReviewError, RiskReviewService};
pub use source::{
    PortfolioSnapshot, RiskScoreSink, SinkError, SourceError, VendorDataSource,
    VendorScoreUpdate,
};
