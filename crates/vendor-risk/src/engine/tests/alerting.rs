use crate::engine::{
    evaluate, parse_date, AlertStatus, AlertWindow, EngineError, Obligation, ObligationKind,
    RiskEngine,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn contract_due(due_on: NaiveDate) -> Obligation {
    Obligation::due_on(
        ObligationKind::ContractEnd,
        "Hosting agreement",
        due_on,
        AlertWindow::new(7, 30),
    )
}

fn new_year() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn due_within_warning_window_is_expiring_soon() {
    let evaluation = evaluate(&contract_due(date(2024, 1, 8)), new_year());
    assert_eq!(evaluation.status, AlertStatus::ExpiringSoon);
    assert_eq!(evaluation.days_remaining, 7);
}

#[test]
fn past_due_is_overdue_with_negative_days() {
    let evaluation = evaluate(&contract_due(date(2023, 12, 31)), new_year());
    assert_eq!(evaluation.status, AlertStatus::Overdue);
    assert_eq!(evaluation.days_remaining, -1);
}

#[test]
fn due_beyond_warning_window_is_ok() {
    let evaluation = evaluate(&contract_due(date(2024, 2, 15)), new_year());
    assert_eq!(evaluation.status, AlertStatus::Ok);
    assert_eq!(evaluation.days_remaining, 45);
}

#[test]
fn warning_window_edge_is_inclusive() {
    let on_edge = evaluate(&contract_due(date(2024, 1, 31)), new_year());
    assert_eq!(on_edge.status, AlertStatus::ExpiringSoon);
    assert_eq!(on_edge.days_remaining, 30);

    let past_edge = evaluate(&contract_due(date(2024, 2, 1)), new_year());
    assert_eq!(past_edge.status, AlertStatus::Ok);
}

#[test]
fn due_now_is_not_yet_overdue() {
    let evaluation = evaluate(&contract_due(date(2024, 1, 1)), new_year());
    assert_eq!(evaluation.status, AlertStatus::ExpiringSoon);
    assert_eq!(evaluation.days_remaining, 0);
}

#[test]
fn partial_days_round_up() {
    let now = new_year() + Duration::hours(6);
    let evaluation = evaluate(&contract_due(date(2024, 1, 8)), now);
    assert_eq!(evaluation.days_remaining, 7);

    let overdue = evaluate(&contract_due(date(2023, 12, 31)), now);
    assert_eq!(overdue.days_remaining, -1);
}

#[test]
fn evaluation_is_repeatable() {
    let obligation = contract_due(date(2024, 1, 20));
    assert_eq!(
        evaluate(&obligation, new_year()),
        evaluate(&obligation, new_year())
    );
}

#[test]
fn obligations_parse_dates_and_timestamps() {
    let window = AlertWindow::new(3, 14);
    let from_date = Obligation::parse(ObligationKind::FollowUp, "follow-up", "2024-03-10", window)
        .expect("date parses");
    let from_rfc = Obligation::parse(
        ObligationKind::FollowUp,
        "follow-up",
        "2024-03-10T00:00:00+00:00",
        window,
    )
    .expect("rfc3339 parses");
    assert_eq!(from_date.due, from_rfc.due);

    let naive = Obligation::parse(
        ObligationKind::FollowUp,
        "follow-up",
        "2024-03-10T09:30:00",
        window,
    )
    .expect("naive timestamp parses");
    assert_eq!(naive.due, Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap());
}

#[test]
fn malformed_dates_are_rejected() {
    for raw in ["", "   ", "03/10/2024", "2024-13-01", "next tuesday"] {
        let error = Obligation::parse(
            ObligationKind::AssessmentDue,
            "assessment",
            raw,
            AlertWindow::new(7, 30),
        )
        .expect_err("malformed date");
        assert_eq!(
            error,
            EngineError::InvalidDate {
                value: raw.to_string()
            }
        );
    }

    assert_eq!(parse_date("2024-02-29"), Ok(date(2024, 2, 29)));
    assert!(parse_date("2023-02-29").is_err());
}

#[test]
fn engine_uses_configured_window_per_kind() {
    let engine = RiskEngine::default();
    let certification = engine.obligation(
        ObligationKind::CertificationExpiry,
        "SOC 2 report",
        date(2024, 2, 15),
    );
    assert_eq!(certification.window, AlertWindow::new(14, 60));
    assert_eq!(
        engine.evaluate(&certification, new_year()).status,
        AlertStatus::ExpiringSoon
    );

    let contract = engine.obligation(ObligationKind::ContractEnd, "MSA", date(2024, 2, 15));
    assert_eq!(
        engine.evaluate(&contract, new_year()).status,
        AlertStatus::Ok
    );
}

#[test]
fn oversized_warning_window_still_classifies() {
    for warning_days in [200_000_000, u32::MAX] {
        let obligation = Obligation::due_on(
            ObligationKind::ContractEnd,
            "MSA",
            date(2024, 2, 15),
            AlertWindow::new(7, warning_days),
        );
        let evaluation = evaluate(&obligation, new_year());
        assert_eq!(evaluation.status, AlertStatus::ExpiringSoon);
        assert_eq!(evaluation.days_remaining, 45);
    }

    let lapsed = Obligation::due_on(
        ObligationKind::ContractEnd,
        "MSA",
        date(2023, 12, 30),
        AlertWindow::new(7, u32::MAX),
    );
    assert_eq!(evaluate(&lapsed, new_year()).status, AlertStatus::Overdue);
}
