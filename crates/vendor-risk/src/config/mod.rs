use crate::engine::{AlertWindow, AlertWindows, EngineConfig, EngineError, TierThresholds};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = AlertWindows::default();
        let windows = AlertWindows {
            contract: load_window("CONTRACT", defaults.contract)?,
            assessment: load_window("ASSESSMENT", defaults.assessment)?,
            follow_up: load_window("FOLLOW_UP", defaults.follow_up)?,
            certification: load_window("CERTIFICATION", defaults.certification)?,
        };

        Ok(Self {
            environment,
            engine: EngineConfig {
                thresholds: load_thresholds()?,
                windows,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn load_thresholds() -> Result<TierThresholds, ConfigError> {
    let scheme = match env_value("RISK_TIER_SCHEME") {
        None => TierThresholds::STANDARD,
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "standard" => TierThresholds::STANDARD,
            "legacy" => TierThresholds::LEGACY,
            _ => return Err(ConfigError::UnknownTierScheme(value)),
        },
    };

    let explicit = (
        env_number::<f64>("RISK_TIER_LOW_MAX")?,
        env_number::<f64>("RISK_TIER_MEDIUM_MAX")?,
        env_number::<f64>("RISK_TIER_HIGH_MAX")?,
    );

    match explicit {
        (None, None, None) => Ok(scheme),
        (Some(low_max), Some(medium_max), Some(high_max)) => {
            TierThresholds::new(low_max, medium_max, high_max).map_err(ConfigError::Thresholds)
        }
        _ => Err(ConfigError::PartialThresholds),
    }
}

fn load_window(prefix: &'static str, default: AlertWindow) -> Result<AlertWindow, ConfigError> {
    let warning_days =
        env_number::<u32>(&format!("{prefix}_WARNING_DAYS"))?.unwrap_or(default.warning_days);
    let critical_days =
        env_number::<u32>(&format!("{prefix}_CRITICAL_DAYS"))?.unwrap_or(default.critical_days);

    if critical_days > warning_days {
        return Err(ConfigError::InvertedWindow {
            prefix,
            critical_days,
            warning_days,
        });
    }

    Ok(AlertWindow::new(critical_days, warning_days))
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_number<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    env_value(key)
        .map(|value| {
            value.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        key: String,
        value: String,
    },
    UnknownTierScheme(String),
    PartialThresholds,
    Thresholds(EngineError),
    InvertedWindow {
        prefix: &'static str,
        critical_days: u32,
        warning_days: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{} must be a number, found '{}'", key, value)
            }
            ConfigError::UnknownTierScheme(value) => write!(
                f,
                "RISK_TIER_SCHEME must be 'standard' or 'legacy', found '{}'",
                value
            ),
            ConfigError::PartialThresholds => write!(
                f,
                "RISK_TIER_LOW_MAX, RISK_TIER_MEDIUM_MAX and RISK_TIER_HIGH_MAX must be set together"
            ),
            ConfigError::Thresholds(err) => write!(f, "{}", err),
            ConfigError::InvertedWindow {
                prefix,
                critical_days,
                warning_days,
            } => write!(
                f,
                "{prefix}_CRITICAL_DAYS ({critical_days}) must not exceed {prefix}_WARNING_DAYS ({warning_days})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Thresholds(err) => Some(err),
            ConfigError::InvalidNumber { .. }
            | ConfigError::UnknownTierScheme(_)
            | ConfigError::PartialThresholds
            | ConfigError::InvertedWindow { .. } => None,
        }
    }
}
