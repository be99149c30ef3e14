use super::error::EngineError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Calendar month bucket. Orders chronologically and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Accepts `YYYY-MM`, or a full `YYYY-MM-DD` date which is truncated to its month.
    pub fn parse(value: &str) -> Result<Self, EngineError> {
        let trimmed = value.trim();

        if trimmed.len() > 7 {
            return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| Self::from_date(&date))
                .map_err(|_| EngineError::invalid_date(value));
        }

        let (year, month) = trimmed
            .split_once('-')
            .filter(|(year, month)| {
                year.len() == 4
                    && month.len() == 2
                    && year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| EngineError::invalid_date(value))?;

        let year: i32 = year.parse().map_err(|_| EngineError::invalid_date(value))?;
        let month: u32 = month.parse().map_err(|_| EngineError::invalid_date(value))?;
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_date(value));
        }

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub month: MonthKey,
    pub value: f64,
}

impl PeriodRecord {
    pub fn on(date: NaiveDate, value: f64) -> Self {
        Self {
            month: MonthKey::from_date(&date),
            value,
        }
    }

    pub fn for_month(month: &str, value: f64) -> Result<Self, EngineError> {
        Ok(Self {
            month: MonthKey::parse(month)?,
            value,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendReducer {
    Count,
    Sum,
    /// Mean of each month's own values; months never influence each other.
    #[serde(alias = "running_average")]
    MonthlyAverage,
}

#[derive(Default)]
struct MonthBucket {
    count: usize,
    total: f64,
}

pub fn fold_by_month(records: &[PeriodRecord], reducer: TrendReducer) -> BTreeMap<MonthKey, f64> {
    let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    for record in records {
        let bucket = buckets.entry(record.month).or_default();
        bucket.count += 1;
        bucket.total += record.value;
    }

    buckets
        .into_iter()
        .map(|(month, bucket)| {
            let value = match reducer {
                TrendReducer::Count => bucket.count as f64,
                TrendReducer::Sum => bucket.total,
                TrendReducer::MonthlyAverage => bucket.total / bucket.count as f64,
            };
            (month, value)
        })
        .collect()
}
