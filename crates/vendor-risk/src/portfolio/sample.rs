//! Seeded demo portfolio standing in for the backend store.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::{
    Assessment, AssessmentKind, Contract, DueDiligenceChecklist, DueDiligenceReview, Incident,
    IncidentSeverity, RiskProfile, Scorecard, Vendor, VendorId, VendorStatus,
};
use super::source::{PortfolioSnapshot, SourceError, VendorDataSource};
use crate::engine::{start_of_day, RiskDimension, StepStatus, WeightedCategory, WorkflowStep};

const VENDOR_NAMES: [&str; 12] = [
    "Northwind Hosting",
    "Bluefin Payroll",
    "Cobalt Analytics",
    "Meridian Logistics",
    "Harbor Legal Services",
    "Quartz Security",
    "Summit Facilities",
    "Lattice Data Centers",
    "Pioneer Staffing",
    "Beacon Telecom",
    "Evergreen Print & Mail",
    "Atlas Cloud Backup",
];

const CATEGORIES: [&str; 6] = [
    "Cloud Services",
    "Professional Services",
    "Logistics",
    "Facilities",
    "Telecommunications",
    "Software",
];

const ASSESSMENT_STEPS: [&str; 5] = [
    "scoping",
    "questionnaire",
    "evidence_review",
    "risk_rating",
    "approval",
];

const SCORECARD_WEIGHTS: [(&str, f64); 4] = [
    ("quality", 0.35),
    ("delivery", 0.25),
    ("cost", 0.2),
    ("responsiveness", 0.2),
];

const SCORECARD_MONTHS: u32 = 3;

/// Deterministic sample data: the same seed, date and size always yield the same portfolio.
#[derive(Debug, Clone)]
pub struct SampleDataProvider {
    snapshot: PortfolioSnapshot,
}

impl SampleDataProvider {
    pub fn new(seed: u64, today: NaiveDate, vendor_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut snapshot = PortfolioSnapshot::default();

        for index in 0..vendor_count {
            let vendor = sample_vendor(&mut rng, index, today);

            let contract_count = rng.gen_range(1..=2);
            for sequence in 0..contract_count {
                snapshot
                    .contracts
                    .push(sample_contract(&mut rng, &vendor, sequence, today));
            }

            snapshot
                .assessments
                .push(sample_assessment(&mut rng, &vendor, today));

            if vendor.status == VendorStatus::Onboarding || rng.gen_bool(0.3) {
                snapshot
                    .due_diligence
                    .push(sample_review(&mut rng, &vendor, today));
            }

            let incident_count = rng.gen_range(0..=3);
            for sequence in 0..incident_count {
                snapshot
                    .incidents
                    .push(sample_incident(&mut rng, &vendor, sequence, today));
            }

            if vendor.status == VendorStatus::Active {
                for months_back in 0..SCORECARD_MONTHS {
                    let scorecard = sample_scorecard(&mut rng, &vendor, months_back, today);
                    snapshot.scorecards.extend(scorecard);
                }
            }

            snapshot.vendors.push(vendor);
        }

        Self { snapshot }
    }

    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }
}

impl VendorDataSource for SampleDataProvider {
    fn vendors(&self) -> Result<Vec<Vendor>, SourceError> {
        Ok(self.snapshot.vendors.clone())
    }

    fn contracts(&self) -> Result<Vec<Contract>, SourceError> {
        Ok(self.snapshot.contracts.clone())
    }

    fn assessments(&self) -> Result<Vec<Assessment>, SourceError> {
        Ok(self.snapshot.assessments.clone())
    }

    fn due_diligence(&self) -> Result<Vec<DueDiligenceReview>, SourceError> {
        Ok(self.snapshot.due_diligence.clone())
    }

    fn incidents(&self) -> Result<Vec<Incident>, SourceError> {
        Ok(self.snapshot.incidents.clone())
    }

    fn scorecards(&self) -> Result<Vec<Scorecard>, SourceError> {
        Ok(self.snapshot.scorecards.clone())
    }
}

fn days(offset: i64) -> Duration {
    Duration::days(offset)
}

fn sample_profile(rng: &mut StdRng) -> RiskProfile {
    let mut profile = RiskProfile::default();
    for dimension in RiskDimension::ordered() {
        let value = if rng.gen_bool(0.15) {
            None
        } else {
            Some(f64::from(rng.gen_range(5u8..=95)))
        };
        profile.set(dimension, value);
    }
    profile
}

fn sample_vendor(rng: &mut StdRng, index: usize, today: NaiveDate) -> Vendor {
    let base = VENDOR_NAMES[index % VENDOR_NAMES.len()];
    let name = match index / VENDOR_NAMES.len() {
        0 => base.to_string(),
        round => format!("{base} {}", round + 1),
    };

    let status = match rng.gen_range(0..10) {
        0 => VendorStatus::Offboarded,
        1 | 2 => VendorStatus::Onboarding,
        _ => VendorStatus::Active,
    };

    let certification_expires_on = rng
        .gen_bool(0.5)
        .then(|| today + days(rng.gen_range(-20..120)));

    Vendor {
        id: VendorId(format!("vnd-{:04}", index + 1)),
        name,
        category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string(),
        status,
        risk: sample_profile(rng),
        certification_expires_on,
    }
}

fn sample_contract(
    rng: &mut StdRng,
    vendor: &Vendor,
    sequence: usize,
    today: NaiveDate,
) -> Contract {
    let starts_on = today - days(rng.gen_range(90..720));
    let ends_on = today + days(rng.gen_range(-15..200));

    Contract {
        id: format!("{}-ctr-{}", vendor.id, sequence + 1),
        vendor_id: vendor.id.clone(),
        title: format!("{} services agreement #{}", vendor.name, sequence + 1),
        annual_value: f64::from(rng.gen_range(10u32..500) * 1_000),
        starts_on,
        ends_on,
        auto_renew: rng.gen_bool(0.3),
    }
}

fn sample_assessment(rng: &mut StdRng, vendor: &Vendor, today: NaiveDate) -> Assessment {
    let kind = match rng.gen_range(0..4) {
        0 => AssessmentKind::Initial,
        1 => AssessmentKind::Periodic,
        2 => AssessmentKind::IncidentDriven,
        _ => AssessmentKind::Offboarding,
    };

    let reached = rng.gen_range(0..=ASSESSMENT_STEPS.len());
    let stalled = rng.gen_bool(0.05);
    let steps = ASSESSMENT_STEPS
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let due_on = today + days(position as i64 * 7 - 14);
            let mut step = WorkflowStep::pending(*name).with_due_on(due_on);
            if position < reached {
                step.status = StepStatus::Completed;
                step.completed_at = Some(start_of_day(due_on));
            } else if position == reached {
                step.status = if stalled {
                    StepStatus::Failed
                } else {
                    StepStatus::InProgress
                };
            }
            step
        })
        .collect();

    Assessment {
        id: format!("{}-asm", vendor.id),
        vendor_id: vendor.id.clone(),
        kind,
        risk: sample_profile(rng),
        steps,
        next_assessment_on: Some(today + days(rng.gen_range(-10..180))),
    }
}

fn sample_review(rng: &mut StdRng, vendor: &Vendor, today: NaiveDate) -> DueDiligenceReview {
    DueDiligenceReview {
        id: format!("{}-dd", vendor.id),
        vendor_id: vendor.id.clone(),
        checklist: DueDiligenceChecklist {
            financial_review: rng.gen_bool(0.6),
            legal_review: rng.gen_bool(0.6),
            security_review: rng.gen_bool(0.6),
            compliance_review: rng.gen_bool(0.6),
            reference_check: rng.gen_bool(0.6),
            insurance_verification: rng.gen_bool(0.6),
        },
        follow_up_on: Some(today + days(rng.gen_range(-5..30))),
    }
}

fn sample_incident(
    rng: &mut StdRng,
    vendor: &Vendor,
    sequence: usize,
    today: NaiveDate,
) -> Incident {
    let severity = match rng.gen_range(0..10) {
        0 => IncidentSeverity::Critical,
        1 | 2 => IncidentSeverity::High,
        3..=5 => IncidentSeverity::Medium,
        _ => IncidentSeverity::Low,
    };
    let reported_on = today - days(rng.gen_range(0..180));
    let resolved_on = rng
        .gen_bool(0.7)
        .then(|| reported_on + days(rng.gen_range(0..14)))
        .filter(|resolved| *resolved <= today);

    Incident {
        id: format!("{}-inc-{}", vendor.id, sequence + 1),
        vendor_id: vendor.id.clone(),
        severity,
        reported_on,
        resolved_on,
        impact_score: Some(f64::from(rng.gen_range(10u8..90))),
    }
}

fn sample_scorecard(
    rng: &mut StdRng,
    vendor: &Vendor,
    months_back: u32,
    today: NaiveDate,
) -> Option<Scorecard> {
    let period = today
        .with_day(1)?
        .checked_sub_months(Months::new(months_back))?;

    let categories = SCORECARD_WEIGHTS
        .iter()
        .map(|(name, weight)| {
            WeightedCategory::new(*name, *weight, f64::from(rng.gen_range(50u8..=100)))
        })
        .collect();

    Some(Scorecard {
        vendor_id: vendor.id.clone(),
        period,
        categories,
    })
}
