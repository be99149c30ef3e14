use super::error::EngineError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    ContractEnd,
    AssessmentDue,
    FollowUp,
    CertificationExpiry,
}

impl ObligationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ContractEnd => "Contract End",
            Self::AssessmentDue => "Assessment Due",
            Self::FollowUp => "Follow-up",
            Self::CertificationExpiry => "Certification Expiry",
        }
    }
}

/// Alerting windows in days. `critical_days` is only a severity hint for callers; the
/// evaluator itself only looks at `warning_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertWindow {
    pub critical_days: u32,
    pub warning_days: u32,
}

impl AlertWindow {
    pub const fn new(critical_days: u32, warning_days: u32) -> Self {
        Self {
            critical_days,
            warning_days,
        }
    }
}

/// A dated commitment tracked for expiry or overdue alerting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub kind: ObligationKind,
    pub label: String,
    pub due: DateTime<Utc>,
    pub window: AlertWindow,
}

impl Obligation {
    pub fn new(
        kind: ObligationKind,
        label: impl Into<String>,
        due: DateTime<Utc>,
        window: AlertWindow,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            due,
            window,
        }
    }

    /// Obligation falling due at the start of `due_on` (UTC).
    pub fn due_on(
        kind: ObligationKind,
        label: impl Into<String>,
        due_on: NaiveDate,
        window: AlertWindow,
    ) -> Self {
        Self::new(kind, label, start_of_day(due_on), window)
    }

    /// Build an obligation from a raw date string, accepting RFC 3339 timestamps,
    /// `YYYY-MM-DDTHH:MM:SS` (UTC) and plain `YYYY-MM-DD` dates.
    pub fn parse(
        kind: ObligationKind,
        label: impl Into<String>,
        raw_due: &str,
        window: AlertWindow,
    ) -> Result<Self, EngineError> {
        let due = parse_timestamp(raw_due)?;
        Ok(Self::new(kind, label, due, window))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Ok,
    ExpiringSoon,
    Overdue,
}

impl AlertStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Overdue => "Overdue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvaluation {
    pub status: AlertStatus,
    /// Whole days until the due date, rounded up. Negative once the date has passed.
    pub days_remaining: i64,
}

pub fn evaluate(obligation: &Obligation, now: DateTime<Utc>) -> AlertEvaluation {
    let until_due = obligation.due - now;
    let days_remaining = ceil_days(until_due);

    // Compared as durations: shifting `now` by a large window overflows chrono's range.
    let status = if obligation.due < now {
        AlertStatus::Overdue
    } else if until_due <= Duration::days(i64::from(obligation.window.warning_days)) {
        AlertStatus::ExpiringSoon
    } else {
        AlertStatus::Ok
    };

    AlertEvaluation {
        status,
        days_remaining,
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Parse a calendar date, also accepting timestamps (truncated to their UTC date).
pub fn parse_date(value: &str) -> Result<NaiveDate, EngineError> {
    parse_timestamp(value).map(|timestamp| timestamp.date_naive())
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_date(value));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }

    Err(EngineError::invalid_date(value))
}

fn ceil_days(delta: Duration) -> i64 {
    let millis = delta.num_milliseconds();
    let whole_days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole_days + 1
    } else {
        whole_days
    }
}
