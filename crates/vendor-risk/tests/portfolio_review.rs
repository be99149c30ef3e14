use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use vendor_risk::engine::{
    start_of_day, AlertStatus, EngineConfig, EngineError, MonthKey, ObligationKind, RiskTier,
    StepStatus, TierThresholds, WeightedCategory, WorkflowStatus, WorkflowStep,
};
use vendor_risk::portfolio::{
    AlertSeverity, Assessment, AssessmentKind, Contract, DueDiligenceChecklist,
    DueDiligenceReview, Incident, IncidentSeverity, PortfolioSnapshot, RiskProfile,
    RiskReviewError, RiskReviewService, RiskScoreSink, SampleDataProvider, Scorecard, SinkError,
    SourceError, Vendor, VendorDataSource, VendorId, VendorScoreUpdate, VendorStatus,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn review_time() -> DateTime<Utc> {
    start_of_day(date(2025, 3, 10))
}

struct FixedSource(PortfolioSnapshot);

impl VendorDataSource for FixedSource {
    fn vendors(&self) -> Result<Vec<Vendor>, SourceError> {
        Ok(self.0.vendors.clone())
    }

    fn contracts(&self) -> Result<Vec<Contract>, SourceError> {
        Ok(self.0.contracts.clone())
    }

    fn assessments(&self) -> Result<Vec<Assessment>, SourceError> {
        Ok(self.0.assessments.clone())
    }

    fn due_diligence(&self) -> Result<Vec<DueDiligenceReview>, SourceError> {
        Ok(self.0.due_diligence.clone())
    }

    fn incidents(&self) -> Result<Vec<Incident>, SourceError> {
        Ok(self.0.incidents.clone())
    }

    fn scorecards(&self) -> Result<Vec<Scorecard>, SourceError> {
        Ok(self.0.scorecards.clone())
    }
}

struct UnavailableSource;

impl VendorDataSource for UnavailableSource {
    fn vendors(&self) -> Result<Vec<Vendor>, SourceError> {
        Err(SourceError::Unavailable("vendor store offline".to_string()))
    }

    fn contracts(&self) -> Result<Vec<Contract>, SourceError> {
        Ok(Vec::new())
    }

    fn assessments(&self) -> Result<Vec<Assessment>, SourceError> {
        Ok(Vec::new())
    }

    fn due_diligence(&self) -> Result<Vec<DueDiligenceReview>, SourceError> {
        Ok(Vec::new())
    }

    fn incidents(&self) -> Result<Vec<Incident>, SourceError> {
        Ok(Vec::new())
    }

    fn scorecards(&self) -> Result<Vec<Scorecard>, SourceError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct RecordingSink {
    updates: Mutex<Vec<VendorScoreUpdate>>,
}

impl RecordingSink {
    fn updates(&self) -> Vec<VendorScoreUpdate> {
        self.updates.lock().expect("sink mutex poisoned").clone()
    }
}

impl RiskScoreSink for RecordingSink {
    fn record_vendor_score(&self, update: VendorScoreUpdate) -> Result<(), SinkError> {
        self.updates.lock().expect("sink mutex poisoned").push(update);
        Ok(())
    }
}

struct RejectingSink;

impl RiskScoreSink for RejectingSink {
    fn record_vendor_score(&self, update: VendorScoreUpdate) -> Result<(), SinkError> {
        Err(SinkError::NotFound(update.vendor_id))
    }
}

fn vendor(id: &str, name: &str, status: VendorStatus, risk: RiskProfile) -> Vendor {
    Vendor {
        id: VendorId(id.to_string()),
        name: name.to_string(),
        category: "Software".to_string(),
        status,
        risk,
        certification_expires_on: None,
    }
}

fn contract(
    id: &str,
    vendor_id: &str,
    title: &str,
    ends_on: NaiveDate,
    auto_renew: bool,
) -> Contract {
    Contract {
        id: id.to_string(),
        vendor_id: VendorId(vendor_id.to_string()),
        title: title.to_string(),
        annual_value: 120_000.0,
        starts_on: date(2024, 1, 1),
        ends_on,
        auto_renew,
    }
}

fn incident(id: &str, reported_on: NaiveDate, impact_score: Option<f64>) -> Incident {
    Incident {
        id: id.to_string(),
        vendor_id: VendorId("vnd-acme".to_string()),
        severity: IncidentSeverity::Medium,
        reported_on,
        resolved_on: None,
        impact_score,
    }
}

fn step(name: &str, status: StepStatus, due_on: NaiveDate) -> WorkflowStep {
    let mut step = WorkflowStep::pending(name).with_due_on(due_on);
    step.status = status;
    step
}

fn fixture_portfolio() -> PortfolioSnapshot {
    let mut acme = vendor(
        "vnd-acme",
        "Acme Hosting",
        VendorStatus::Active,
        RiskProfile {
            financial: Some(80.0),
            security: Some(90.0),
            ..RiskProfile::default()
        },
    );
    acme.certification_expires_on = Some(date(2025, 3, 20));

    let beta = vendor(
        "vnd-beta",
        "Beta Payroll",
        VendorStatus::Onboarding,
        RiskProfile::default(),
    );

    let gamma = vendor(
        "vnd-gamma",
        "Gamma Legal",
        VendorStatus::Offboarded,
        RiskProfile {
            operational: Some(20.0),
            ..RiskProfile::default()
        },
    );

    PortfolioSnapshot {
        vendors: vec![acme, beta, gamma],
        contracts: vec![
            contract("ctr-1", "vnd-acme", "Acme hosting agreement", date(2025, 4, 1), false),
            contract("ctr-2", "vnd-beta", "Beta payroll services", date(2025, 3, 5), false),
            contract("ctr-3", "vnd-acme", "Acme backup add-on", date(2025, 3, 12), true),
            contract("ctr-4", "vnd-gamma", "Gamma retainer", date(2025, 3, 1), false),
        ],
        assessments: vec![Assessment {
            id: "asm-acme".to_string(),
            vendor_id: VendorId("vnd-acme".to_string()),
            kind: AssessmentKind::Periodic,
            risk: RiskProfile::default(),
            steps: vec![
                step("scoping", StepStatus::Completed, date(2025, 2, 1)),
                step("questionnaire", StepStatus::Completed, date(2025, 2, 15)),
                step("evidence_review", StepStatus::InProgress, date(2025, 3, 5)),
                step("risk_rating", StepStatus::Pending, date(2025, 3, 1)),
                step("approval", StepStatus::Pending, date(2025, 3, 30)),
            ],
            next_assessment_on: None,
        }],
        due_diligence: vec![
            DueDiligenceReview {
                id: "dd-beta".to_string(),
                vendor_id: VendorId("vnd-beta".to_string()),
                checklist: DueDiligenceChecklist {
                    financial_review: true,
                    legal_review: true,
                    security_review: true,
                    ..DueDiligenceChecklist::default()
                },
                follow_up_on: Some(date(2025, 3, 12)),
            },
            DueDiligenceReview {
                id: "dd-acme".to_string(),
                vendor_id: VendorId("vnd-acme".to_string()),
                checklist: DueDiligenceChecklist {
                    financial_review: true,
                    legal_review: true,
                    security_review: true,
                    compliance_review: true,
                    reference_check: true,
                    insurance_verification: true,
                },
                follow_up_on: Some(date(2025, 2, 1)),
            },
        ],
        incidents: vec![
            incident("inc-1", date(2025, 1, 4), Some(40.0)),
            incident("inc-2", date(2025, 1, 28), Some(60.0)),
            incident("inc-3", date(2025, 2, 9), None),
        ],
        scorecards: vec![
            Scorecard {
                vendor_id: VendorId("vnd-acme".to_string()),
                period: date(2025, 2, 1),
                categories: vec![
                    WeightedCategory::new("quality", 0.5, 80.0),
                    WeightedCategory::new("delivery", 0.5, 60.0),
                ],
            },
            Scorecard {
                vendor_id: VendorId("vnd-acme".to_string()),
                period: date(2025, 1, 1),
                categories: vec![WeightedCategory::new("quality", 1.0, 90.0)],
            },
        ],
    }
}

fn month(raw: &str) -> MonthKey {
    MonthKey::parse(raw).expect("valid month")
}

#[test]
fn review_scores_vendors_and_records_every_score() {
    let sink = Arc::new(RecordingSink::default());
    let service = RiskReviewService::new(
        Arc::new(FixedSource(fixture_portfolio())),
        sink.clone(),
        EngineConfig::default(),
    );

    let report = service.run(review_time()).expect("review succeeds");

    let scores: Vec<(&str, Option<u8>, Option<RiskTier>)> = report
        .vendor_scores
        .iter()
        .map(|score| (score.vendor_id.0.as_str(), score.score, score.tier))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("vnd-acme", Some(85), Some(RiskTier::Critical)),
            ("vnd-beta", None, None),
            ("vnd-gamma", Some(20), Some(RiskTier::Low)),
        ]
    );
    assert_eq!(report.unscored_vendors(), 1);
    assert_eq!(report.tier_counts.get(&RiskTier::Critical), Some(&1));
    assert_eq!(report.tier_counts.get(&RiskTier::Low), Some(&1));
    assert_eq!(report.tier_counts.get(&RiskTier::High), None);

    let updates = sink.updates();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0].overall_risk_score, Some(85));
    assert_eq!(updates[1].overall_risk_score, None);
    assert_eq!(updates[1].tier, None);
}

#[test]
fn alerts_cover_open_obligations_sorted_by_urgency() {
    let sink = Arc::new(RecordingSink::default());
    let service = RiskReviewService::new(
        Arc::new(FixedSource(fixture_portfolio())),
        sink,
        EngineConfig::default(),
    );
    let report = service.run(review_time()).expect("review succeeds");

    let alerts: Vec<(&str, ObligationKind, AlertStatus, i64, AlertSeverity)> = report
        .alerts
        .iter()
        .map(|alert| {
            (
                alert.label.as_str(),
                alert.kind,
                alert.status,
                alert.days_remaining,
                alert.severity,
            )
        })
        .collect();

    assert_eq!(
        alerts,
        vec![
            (
                "Beta payroll services",
                ObligationKind::ContractEnd,
                AlertStatus::Overdue,
                -5,
                AlertSeverity::Critical,
            ),
            (
                "Due diligence follow-up (dd-beta)",
                ObligationKind::FollowUp,
                AlertStatus::ExpiringSoon,
                2,
                AlertSeverity::Critical,
            ),
            (
                "Acme Hosting certification",
                ObligationKind::CertificationExpiry,
                AlertStatus::ExpiringSoon,
                10,
                AlertSeverity::Critical,
            ),
            (
                "Acme hosting agreement",
                ObligationKind::ContractEnd,
                AlertStatus::ExpiringSoon,
                22,
                AlertSeverity::Warning,
            ),
        ]
    );
    assert_eq!(report.critical_alerts(), 3);
}

#[test]
fn workflows_and_trends_are_summarised() {
    let service = RiskReviewService::new(
        Arc::new(FixedSource(fixture_portfolio())),
        Arc::new(RecordingSink::default()),
        EngineConfig::default(),
    );
    let report = service.run(review_time()).expect("review succeeds");

    let assessment = report
        .workflows
        .iter()
        .find(|workflow| workflow.reference == "asm-acme")
        .expect("assessment progress present");
    assert_eq!(assessment.percent_complete, 40);
    assert_eq!(assessment.status, WorkflowStatus::InProgress);
    assert_eq!(assessment.overdue_steps, vec!["risk_rating", "evidence_review"]);

    let review = report
        .workflows
        .iter()
        .find(|workflow| workflow.reference == "dd-beta")
        .expect("due diligence progress present");
    assert_eq!(review.percent_complete, 50);
    assert_eq!(review.status, WorkflowStatus::InProgress);

    let completed = report
        .workflows
        .iter()
        .find(|workflow| workflow.reference == "dd-acme")
        .expect("completed review present");
    assert_eq!(completed.status, WorkflowStatus::Completed);

    assert_eq!(
        report.incident_counts.iter().collect::<Vec<_>>(),
        vec![(&month("2025-01"), &2.0), (&month("2025-02"), &1.0)]
    );
    assert_eq!(
        report.incident_impact.iter().collect::<Vec<_>>(),
        vec![(&month("2025-01"), &50.0)]
    );
    assert_eq!(
        report.scorecard_trend.iter().collect::<Vec<_>>(),
        vec![(&month("2025-01"), &90.0), (&month("2025-02"), &70.0)]
    );

    let february = report
        .scorecards
        .iter()
        .find(|scorecard| scorecard.period == month("2025-02"))
        .expect("february scorecard");
    assert_eq!(february.score, 70);
    assert_eq!(february.tier, RiskTier::High);
}

#[test]
fn summary_serialises_labels_in_tier_order() {
    let service = RiskReviewService::new(
        Arc::new(FixedSource(fixture_portfolio())),
        Arc::new(RecordingSink::default()),
        EngineConfig::default(),
    );
    let summary = service
        .run(review_time())
        .expect("review succeeds")
        .summary();

    let labels: Vec<&str> = summary
        .tier_distribution
        .iter()
        .map(|entry| entry.tier_label)
        .collect();
    assert_eq!(labels, vec!["Low", "Medium", "High", "Critical"]);
    assert_eq!(summary.highest_risk[0].vendor_name, "Acme Hosting");

    let json = serde_json::to_value(&summary).expect("summary serialises");
    assert_eq!(json["alerts"][0]["status"], "overdue");
    assert_eq!(json["alerts"][0]["due_on"], "2025-03-05");
    assert_eq!(json["scorecard_trend"][0]["month"], "2025-01");
}

#[test]
fn configured_thresholds_change_tiers() {
    let mut portfolio = fixture_portfolio();
    portfolio.vendors[0].risk = RiskProfile {
        compliance: Some(55.0),
        ..RiskProfile::default()
    };

    let standard = RiskReviewService::new(
        Arc::new(FixedSource(portfolio.clone())),
        Arc::new(RecordingSink::default()),
        EngineConfig::default(),
    )
    .run(review_time())
    .expect("standard review");
    let legacy = RiskReviewService::new(
        Arc::new(FixedSource(portfolio)),
        Arc::new(RecordingSink::default()),
        EngineConfig {
            thresholds: TierThresholds::LEGACY,
            ..EngineConfig::default()
        },
    )
    .run(review_time())
    .expect("legacy review");

    assert_eq!(standard.vendor_scores[0].tier, Some(RiskTier::Medium));
    assert_eq!(legacy.vendor_scores[0].tier, Some(RiskTier::High));
}

#[test]
fn invalid_scorecard_weights_abort_before_write_back() {
    let mut portfolio = fixture_portfolio();
    portfolio.scorecards[0]
        .categories
        .push(WeightedCategory::new("cost", -0.25, 50.0));

    let sink = Arc::new(RecordingSink::default());
    let service = RiskReviewService::new(
        Arc::new(FixedSource(portfolio)),
        sink.clone(),
        EngineConfig::default(),
    );

    match service.run(review_time()) {
        Err(RiskReviewError::Engine(EngineError::InvalidWeight { category, weight })) => {
            assert_eq!(category, "cost");
            assert_eq!(weight, -0.25);
        }
        other => panic!("expected invalid weight, got {other:?}"),
    }
    assert!(sink.updates().is_empty());
}

#[test]
fn source_and_sink_failures_propagate() {
    let service = RiskReviewService::new(
        Arc::new(UnavailableSource),
        Arc::new(RecordingSink::default()),
        EngineConfig::default(),
    );
    assert!(matches!(
        service.run(review_time()),
        Err(RiskReviewError::Source(SourceError::Unavailable(_)))
    ));

    let service = RiskReviewService::new(
        Arc::new(FixedSource(fixture_portfolio())),
        Arc::new(RejectingSink),
        EngineConfig::default(),
    );
    match service.run(review_time()) {
        Err(RiskReviewError::Sink(SinkError::NotFound(id))) => assert_eq!(id.0, "vnd-acme"),
        other => panic!("expected sink failure, got {other:?}"),
    }
}

#[test]
fn sample_portfolio_is_reproducible() {
    let today = date(2025, 6, 2);
    let now = start_of_day(today);

    let summarise = |seed: u64| {
        let service = RiskReviewService::new(
            Arc::new(SampleDataProvider::new(seed, today, 20)),
            Arc::new(RecordingSink::default()),
            EngineConfig::default(),
        );
        let report = service.run(now).expect("sample review succeeds");
        serde_json::to_string(&report.summary()).expect("summary serialises")
    };

    assert_eq!(summarise(42), summarise(42));

    let provider = SampleDataProvider::new(42, today, 20);
    let snapshot = provider.snapshot();
    assert_eq!(snapshot.vendors.len(), 20);
    let ids: HashSet<&VendorId> = snapshot.vendors.iter().map(|vendor| &vendor.id).collect();
    assert_eq!(ids.len(), 20);
    assert!(snapshot
        .contracts
        .iter()
        .all(|contract| snapshot.vendor_name(&contract.vendor_id).is_some()));
}

#[test]
fn sample_alerts_are_never_ok_and_stay_sorted() {
    let today = date(2025, 6, 2);
    let service = RiskReviewService::new(
        Arc::new(SampleDataProvider::new(7, today, 30)),
        Arc::new(RecordingSink::default()),
        EngineConfig::default(),
    );
    let report = service.run(start_of_day(today)).expect("sample review");

    assert!(report
        .alerts
        .iter()
        .all(|alert| alert.status != AlertStatus::Ok));
    assert!(report
        .alerts
        .windows(2)
        .all(|pair| pair[0].days_remaining <= pair[1].days_remaining));
    assert!(report
        .workflows
        .iter()
        .all(|workflow| workflow.percent_complete <= 100));
}
