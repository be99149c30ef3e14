use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

use super::domain::{Assessment, DueDiligenceReview, Scorecard, Vendor, VendorId, VendorStatus};
use super::report::{
    AlertSeverity, ObligationAlert, PortfolioReport, ScorecardResult, VendorRiskScore,
    WorkflowProgress,
};
use super::source::PortfolioSnapshot;
use crate::engine::{
    fold_by_month, overall_status, percent_complete, AlertStatus, EngineError, MonthKey,
    Obligation, ObligationKind, PeriodRecord, RiskAssessment, RiskEngine, TrendReducer, Workflow,
    WorkflowStatus,
};

/// Adapts vendor-management records onto the risk engine.
#[derive(Debug, Clone, Default)]
pub struct PortfolioEvaluator {
    engine: RiskEngine,
}

impl PortfolioEvaluator {
    pub fn new(engine: RiskEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    pub fn vendor_score(&self, vendor: &Vendor) -> VendorRiskScore {
        let RiskAssessment {
            score,
            tier,
            assessed_dimensions,
        } = self.engine.assess(&vendor.risk.dimensions());

        VendorRiskScore {
            vendor_id: vendor.id.clone(),
            vendor_name: vendor.name.clone(),
            score,
            tier,
            assessed_dimensions,
        }
    }

    pub fn assessment_score(&self, assessment: &Assessment) -> RiskAssessment {
        self.engine.assess(&assessment.risk.dimensions())
    }

    /// Open obligations across the portfolio. Offboarded vendors, auto-renewing
    /// contracts and completed reviews raise none.
    pub fn obligations(&self, snapshot: &PortfolioSnapshot) -> Vec<(VendorId, Obligation)> {
        let offboarded: Vec<&VendorId> = snapshot
            .vendors
            .iter()
            .filter(|vendor| vendor.status == VendorStatus::Offboarded)
            .map(|vendor| &vendor.id)
            .collect();
        let is_open = |id: &VendorId| !offboarded.contains(&id);

        let mut obligations = Vec::new();

        for vendor in snapshot.vendors.iter().filter(|vendor| is_open(&vendor.id)) {
            if let Some(expires_on) = vendor.certification_expires_on {
                obligations.push((
                    vendor.id.clone(),
                    self.engine.obligation(
                        ObligationKind::CertificationExpiry,
                        format!("{} certification", vendor.name),
                        expires_on,
                    ),
                ));
            }
        }

        for contract in snapshot
            .contracts
            .iter()
            .filter(|contract| !contract.auto_renew && is_open(&contract.vendor_id))
        {
            obligations.push((
                contract.vendor_id.clone(),
                self.engine.obligation(
                    ObligationKind::ContractEnd,
                    contract.title.clone(),
                    contract.ends_on,
                ),
            ));
        }

        for assessment in snapshot
            .assessments
            .iter()
            .filter(|assessment| is_open(&assessment.vendor_id))
        {
            if let Some(next_on) = assessment.next_assessment_on {
                obligations.push((
                    assessment.vendor_id.clone(),
                    self.engine.obligation(
                        ObligationKind::AssessmentDue,
                        format!("Next {} assessment", assessment.kind.label().to_lowercase()),
                        next_on,
                    ),
                ));
            }
        }

        for review in snapshot
            .due_diligence
            .iter()
            .filter(|review| is_open(&review.vendor_id))
        {
            if let Some(follow_up_on) = review.follow_up_on {
                if overall_status(&review.checklist.steps()) != WorkflowStatus::Completed {
                    obligations.push((
                        review.vendor_id.clone(),
                        self.engine.obligation(
                            ObligationKind::FollowUp,
                            format!("Due diligence follow-up ({})", review.id),
                            follow_up_on,
                        ),
                    ));
                }
            }
        }

        obligations
    }

    /// Evaluate an obligation and attach a severity. Returns `None` when nothing is due.
    pub fn alert(
        &self,
        vendor_id: &VendorId,
        vendor_name: &str,
        obligation: &Obligation,
        now: DateTime<Utc>,
    ) -> Option<ObligationAlert> {
        let evaluation = self.engine.evaluate(obligation, now);
        let severity = match evaluation.status {
            AlertStatus::Ok => return None,
            AlertStatus::Overdue => AlertSeverity::Critical,
            AlertStatus::ExpiringSoon
                if evaluation.days_remaining <= i64::from(obligation.window.critical_days) =>
            {
                AlertSeverity::Critical
            }
            AlertStatus::ExpiringSoon => AlertSeverity::Warning,
        };

        Some(ObligationAlert {
            vendor_id: vendor_id.clone(),
            vendor_name: vendor_name.to_owned(),
            kind: obligation.kind,
            label: obligation.label.clone(),
            due: obligation.due,
            status: evaluation.status,
            days_remaining: evaluation.days_remaining,
            severity,
        })
    }

    pub fn assessment_progress(
        &self,
        assessment: &Assessment,
        vendor_name: &str,
        today: NaiveDate,
    ) -> WorkflowProgress {
        let workflow = Workflow::from_steps(assessment.steps.clone());
        WorkflowProgress {
            reference: assessment.id.clone(),
            subject: format!("{} assessment", assessment.kind.label()),
            vendor_id: assessment.vendor_id.clone(),
            vendor_name: vendor_name.to_owned(),
            percent_complete: workflow.percent_complete(),
            status: workflow.overall_status(),
            overdue_steps: workflow
                .overdue_steps(today)
                .into_iter()
                .map(|step| step.name.clone())
                .collect(),
        }
    }

    pub fn review_progress(
        &self,
        review: &DueDiligenceReview,
        vendor_name: &str,
    ) -> WorkflowProgress {
        let steps = review.checklist.steps();
        WorkflowProgress {
            reference: review.id.clone(),
            subject: "Due diligence review".to_string(),
            vendor_id: review.vendor_id.clone(),
            vendor_name: vendor_name.to_owned(),
            percent_complete: percent_complete(&steps),
            status: overall_status(&steps),
            overdue_steps: Vec::new(),
        }
    }

    pub fn scorecard(
        &self,
        scorecard: &Scorecard,
        vendor_name: &str,
    ) -> Result<ScorecardResult, EngineError> {
        let (score, tier) = self.engine.weighted_score(&scorecard.categories)?;
        Ok(ScorecardResult {
            vendor_id: scorecard.vendor_id.clone(),
            vendor_name: vendor_name.to_owned(),
            period: MonthKey::from_date(&scorecard.period),
            score,
            tier,
        })
    }

    pub fn report(
        &self,
        snapshot: &PortfolioSnapshot,
        now: DateTime<Utc>,
    ) -> Result<PortfolioReport, EngineError> {
        let today = now.date_naive();
        let name_of = |id: &VendorId| {
            snapshot
                .vendor_name(id)
                .map(str::to_owned)
                .unwrap_or_else(|| id.to_string())
        };

        let vendor_scores: Vec<VendorRiskScore> = snapshot
            .vendors
            .iter()
            .map(|vendor| self.vendor_score(vendor))
            .collect();

        let mut tier_counts = HashMap::new();
        for tier in vendor_scores.iter().filter_map(|score| score.tier) {
            *tier_counts.entry(tier).or_insert(0) += 1;
        }

        let mut alerts: Vec<ObligationAlert> = self
            .obligations(snapshot)
            .iter()
            .filter_map(|(vendor_id, obligation)| {
                self.alert(vendor_id, &name_of(vendor_id), obligation, now)
            })
            .collect();
        alerts.sort_by(|a, b| {
            a.days_remaining
                .cmp(&b.days_remaining)
                .then_with(|| a.label.cmp(&b.label))
        });

        let mut workflows: Vec<WorkflowProgress> = snapshot
            .assessments
            .iter()
            .map(|assessment| {
                self.assessment_progress(assessment, &name_of(&assessment.vendor_id), today)
            })
            .collect();
        workflows.extend(
            snapshot
                .due_diligence
                .iter()
                .map(|review| self.review_progress(review, &name_of(&review.vendor_id))),
        );

        let scorecards = snapshot
            .scorecards
            .iter()
            .map(|scorecard| self.scorecard(scorecard, &name_of(&scorecard.vendor_id)))
            .collect::<Result<Vec<_>, _>>()?;

        let incident_records: Vec<PeriodRecord> = snapshot
            .incidents
            .iter()
            .map(|incident| PeriodRecord::on(incident.reported_on, 1.0))
            .collect();
        let impact_records: Vec<PeriodRecord> = snapshot
            .incidents
            .iter()
            .filter_map(|incident| {
                incident
                    .impact_score
                    .map(|impact| PeriodRecord::on(incident.reported_on, impact))
            })
            .collect();
        let scorecard_records: Vec<PeriodRecord> = scorecards
            .iter()
            .map(|result| PeriodRecord {
                month: result.period,
                value: f64::from(result.score),
            })
            .collect();

        Ok(PortfolioReport {
            generated_at: now,
            vendor_scores,
            tier_counts,
            alerts,
            workflows,
            scorecards,
            incident_counts: fold_by_month(&incident_records, TrendReducer::Count),
            incident_impact: fold_by_month(&impact_records, TrendReducer::MonthlyAverage),
            scorecard_trend: fold_by_month(&scorecard_records, TrendReducer::MonthlyAverage),
        })
    }
}
