mod summary;
pub mod views;

pub use summary::{
    AlertSeverity, ObligationAlert, PortfolioReport, ScorecardResult, VendorRiskScore,
    WorkflowProgress,
};
