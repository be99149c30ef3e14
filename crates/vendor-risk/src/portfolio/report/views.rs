use crate::engine::{AlertStatus, MonthKey, ObligationKind, RiskTier, WorkflowStatus};
use crate::portfolio::domain::VendorId;
use crate::portfolio::report::AlertSeverity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TierCountEntry {
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub vendors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorScoreView {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub score: Option<u8>,
    pub tier: Option<RiskTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_label: Option<&'static str>,
    pub assessed_dimensions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub kind: ObligationKind,
    pub kind_label: &'static str,
    pub label: String,
    pub due_on: NaiveDate,
    pub status: AlertStatus,
    pub status_label: &'static str,
    pub days_remaining: i64,
    pub severity: AlertSeverity,
    pub severity_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowView {
    pub reference: String,
    pub subject: String,
    pub vendor_name: String,
    pub percent_complete: u8,
    pub status: WorkflowStatus,
    pub status_label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overdue_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardView {
    pub vendor_name: String,
    pub period: MonthKey,
    pub score: u8,
    pub tier_label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub generated_at: DateTime<Utc>,
    pub vendors: usize,
    pub unscored_vendors: usize,
    pub tier_distribution: Vec<TierCountEntry>,
    pub highest_risk: Vec<VendorScoreView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workflows: Vec<WorkflowView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scorecards: Vec<ScorecardView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incident_trend: Vec<TrendPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incident_impact_trend: Vec<TrendPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scorecard_trend: Vec<TrendPoint>,
}
