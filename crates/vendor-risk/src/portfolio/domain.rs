use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{DimensionScore, RiskDimension, WeightedCategory, WorkflowStep};

/// Identifier wrapper for vendors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VendorId(pub String);

impl std::fmt::Display for VendorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Onboarding,
    Active,
    Offboarded,
}

/// Six-axis risk profile. Unassessed axes stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub financial: Option<f64>,
    pub operational: Option<f64>,
    pub compliance: Option<f64>,
    pub security: Option<f64>,
    pub reputational: Option<f64>,
    pub strategic: Option<f64>,
}

impl RiskProfile {
    pub fn value(&self, dimension: RiskDimension) -> Option<f64> {
        match dimension {
            RiskDimension::Financial => self.financial,
            RiskDimension::Operational => self.operational,
            RiskDimension::Compliance => self.compliance,
            RiskDimension::Security => self.security,
            RiskDimension::Reputational => self.reputational,
            RiskDimension::Strategic => self.strategic,
        }
    }

    pub fn set(&mut self, dimension: RiskDimension, value: Option<f64>) {
        let slot = match dimension {
            RiskDimension::Financial => &mut self.financial,
            RiskDimension::Operational => &mut self.operational,
            RiskDimension::Compliance => &mut self.compliance,
            RiskDimension::Security => &mut self.security,
            RiskDimension::Reputational => &mut self.reputational,
            RiskDimension::Strategic => &mut self.strategic,
        };
        *slot = value;
    }

    pub fn dimensions(&self) -> Vec<DimensionScore> {
        RiskDimension::ordered()
            .into_iter()
            .map(|dimension| DimensionScore::new(dimension, self.value(dimension)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub category: String,
    pub status: VendorStatus,
    pub risk: RiskProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub vendor_id: VendorId,
    pub title: String,
    pub annual_value: f64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub auto_renew: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Initial,
    Periodic,
    IncidentDriven,
    Offboarding,
}

impl AssessmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Periodic => "Periodic",
            Self::IncidentDriven => "Incident-driven",
            Self::Offboarding => "Offboarding",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub vendor_id: VendorId,
    pub kind: AssessmentKind,
    pub risk: RiskProfile,
    pub steps: Vec<WorkflowStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_assessment_on: Option<NaiveDate>,
}

/// Review components tracked as simple done / not-done flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDiligenceChecklist {
    pub financial_review: bool,
    pub legal_review: bool,
    pub security_review: bool,
    pub compliance_review: bool,
    pub reference_check: bool,
    pub insurance_verification: bool,
}

impl DueDiligenceChecklist {
    pub fn steps(&self) -> Vec<WorkflowStep> {
        [
            ("financial_review", self.financial_review),
            ("legal_review", self.legal_review),
            ("security_review", self.security_review),
            ("compliance_review", self.compliance_review),
            ("reference_check", self.reference_check),
            ("insurance_verification", self.insurance_verification),
        ]
        .into_iter()
        .map(|(name, done)| WorkflowStep::from_flag(name, done))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDiligenceReview {
    pub id: String,
    pub vendor_id: VendorId,
    pub checklist: DueDiligenceChecklist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub vendor_id: VendorId,
    pub severity: IncidentSeverity,
    pub reported_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
}

/// Performance scorecard for one vendor and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub vendor_id: VendorId,
    pub period: NaiveDate,
    pub categories: Vec<WeightedCategory>,
}
