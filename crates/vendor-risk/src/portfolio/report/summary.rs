use super::views::{
    AlertView, PortfolioSummary, ScorecardView, TierCountEntry, TrendPoint, VendorScoreView,
    WorkflowView,
};
use crate::engine::{AlertStatus, MonthKey, ObligationKind, RiskTier, WorkflowStatus};
use crate::portfolio::domain::VendorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const HIGHEST_RISK_LIMIT: usize = 5;

/// Severity callers attach to a non-ok alert. Critical when the obligation is overdue or
/// falls inside its critical window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRiskScore {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub score: Option<u8>,
    pub tier: Option<RiskTier>,
    pub assessed_dimensions: usize,
}

impl VendorRiskScore {
    pub fn to_view(&self) -> VendorScoreView {
        VendorScoreView {
            vendor_id: self.vendor_id.clone(),
            vendor_name: self.vendor_name.clone(),
            score: self.score,
            tier: self.tier,
            tier_label: self.tier.map(RiskTier::label),
            assessed_dimensions: self.assessed_dimensions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObligationAlert {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub kind: ObligationKind,
    pub label: String,
    pub due: DateTime<Utc>,
    pub status: AlertStatus,
    pub days_remaining: i64,
    pub severity: AlertSeverity,
}

impl ObligationAlert {
    pub fn to_view(&self) -> AlertView {
        AlertView {
            vendor_id: self.vendor_id.clone(),
            vendor_name: self.vendor_name.clone(),
            kind: self.kind,
            kind_label: self.kind.label(),
            label: self.label.clone(),
            due_on: self.due.date_naive(),
            status: self.status,
            status_label: self.status.label(),
            days_remaining: self.days_remaining,
            severity: self.severity,
            severity_label: self.severity.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowProgress {
    pub reference: String,
    pub subject: String,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub percent_complete: u8,
    pub status: WorkflowStatus,
    pub overdue_steps: Vec<String>,
}

impl WorkflowProgress {
    pub fn to_view(&self) -> WorkflowView {
        WorkflowView {
            reference: self.reference.clone(),
            subject: self.subject.clone(),
            vendor_name: self.vendor_name.clone(),
            percent_complete: self.percent_complete,
            status: self.status,
            status_label: self.status.label(),
            overdue_steps: self.overdue_steps.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorecardResult {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub period: MonthKey,
    pub score: u8,
    pub tier: RiskTier,
}

impl ScorecardResult {
    pub fn to_view(&self) -> ScorecardView {
        ScorecardView {
            vendor_name: self.vendor_name.clone(),
            period: self.period,
            score: self.score,
            tier_label: self.tier.label(),
        }
    }
}

#[derive(Debug)]
pub struct PortfolioReport {
    pub generated_at: DateTime<Utc>,
    pub vendor_scores: Vec<VendorRiskScore>,
    pub tier_counts: HashMap<RiskTier, usize>,
    pub alerts: Vec<ObligationAlert>,
    pub workflows: Vec<WorkflowProgress>,
    pub scorecards: Vec<ScorecardResult>,
    pub incident_counts: BTreeMap<MonthKey, f64>,
    pub incident_impact: BTreeMap<MonthKey, f64>,
    pub scorecard_trend: BTreeMap<MonthKey, f64>,
}

impl PortfolioReport {
    pub fn unscored_vendors(&self) -> usize {
        self.vendor_scores
            .iter()
            .filter(|score| score.score.is_none())
            .count()
    }

    pub fn critical_alerts(&self) -> usize {
        self.alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Critical)
            .count()
    }

    pub fn summary(&self) -> PortfolioSummary {
        let tier_distribution = RiskTier::ordered()
            .into_iter()
            .map(|tier| TierCountEntry {
                tier,
                tier_label: tier.label(),
                vendors: self.tier_counts.get(&tier).copied().unwrap_or_default(),
            })
            .collect();

        let mut ranked: Vec<&VendorRiskScore> = self
            .vendor_scores
            .iter()
            .filter(|score| score.score.is_some())
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.vendor_name.cmp(&b.vendor_name))
        });

        let highest_risk = ranked
            .into_iter()
            .take(HIGHEST_RISK_LIMIT)
            .map(VendorRiskScore::to_view)
            .collect();

        PortfolioSummary {
            generated_at: self.generated_at,
            vendors: self.vendor_scores.len(),
            unscored_vendors: self.unscored_vendors(),
            tier_distribution,
            highest_risk,
            alerts: self.alerts.iter().map(ObligationAlert::to_view).collect(),
            workflows: self
                .workflows
                .iter()
                .map(WorkflowProgress::to_view)
                .collect(),
            scorecards: self
                .scorecards
                .iter()
                .map(ScorecardResult::to_view)
                .collect(),
            incident_trend: trend_points(&self.incident_counts),
            incident_impact_trend: trend_points(&self.incident_impact),
            scorecard_trend: trend_points(&self.scorecard_trend),
        }
    }
}

fn trend_points(folded: &BTreeMap<MonthKey, f64>) -> Vec<TrendPoint> {
    folded
        .iter()
        .map(|(month, value)| TrendPoint {
            month: *month,
            value: *value,
        })
        .collect()
}
