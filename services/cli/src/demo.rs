use crate::infra::{InMemoryScoreSink, TierScheme};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vendor_risk::config::AppConfig;
use vendor_risk::engine::{clamp, start_of_day, EngineConfig, RiskEngine};
use vendor_risk::error::AppError;
use vendor_risk::portfolio::{
    PortfolioReport, RegisterDataSource, RegisterImporter, RiskReviewService, SampleDataProvider,
    VendorDataSource,
};

const DEFAULT_SEED: u64 = 7;
const DEFAULT_VENDORS: usize = 12;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the sample portfolio; the same seed and date reproduce the same report.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,
    /// Number of sample vendors to generate.
    #[arg(long, default_value_t = DEFAULT_VENDORS)]
    pub(crate) vendors: usize,
    /// Evaluation date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the portfolio summary as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            vendors: DEFAULT_VENDORS,
            today: None,
            json: false,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Vendor register CSV export
    #[arg(long)]
    pub(crate) vendors: PathBuf,
    /// Optional contract register CSV export
    #[arg(long)]
    pub(crate) contracts: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the portfolio summary as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TierArgs {
    /// Score to classify; values outside 0-100 are clamped
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) score: f64,
    /// Threshold scheme; defaults to the configured thresholds
    #[arg(long, value_enum)]
    pub(crate) scheme: Option<TierScheme>,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        vendors,
        today,
        json,
    } = args;

    let now = evaluation_time(today);
    let provider = SampleDataProvider::new(seed, now.date_naive(), vendors);
    let source = format!("Sample portfolio (seed {seed}, {vendors} vendors)");
    review(Arc::new(provider), config, now, &source, json)
}

pub(crate) fn run_report(args: ReportArgs, config: &AppConfig) -> Result<(), AppError> {
    let ReportArgs {
        vendors,
        contracts,
        today,
        json,
    } = args;

    let vendor_rows = RegisterImporter::vendors_from_path(&vendors)?;
    let contract_rows = match &contracts {
        Some(path) => RegisterImporter::contracts_from_path(path)?,
        None => Vec::new(),
    };

    let source = match &contracts {
        Some(path) => format!("Registers {} + {}", vendors.display(), path.display()),
        None => format!("Register {}", vendors.display()),
    };

    let registers = RegisterDataSource::new(vendor_rows, contract_rows);
    review(
        Arc::new(registers),
        config,
        evaluation_time(today),
        &source,
        json,
    )
}

pub(crate) fn run_tier(args: TierArgs, config: &AppConfig) -> Result<(), AppError> {
    let thresholds = args
        .scheme
        .map(TierScheme::thresholds)
        .unwrap_or(config.engine.thresholds);
    let engine = RiskEngine::new(EngineConfig {
        thresholds,
        ..config.engine
    });

    let tier = engine.classify(args.score);
    println!(
        "Score {} -> {} (low <= {}, medium <= {}, high <= {})",
        clamp(args.score),
        tier.label(),
        thresholds.low_max,
        thresholds.medium_max,
        thresholds.high_max
    );
    Ok(())
}

fn evaluation_time(today: Option<NaiveDate>) -> DateTime<Utc> {
    today.map(start_of_day).unwrap_or_else(Utc::now)
}

fn review<S>(
    source: Arc<S>,
    config: &AppConfig,
    now: DateTime<Utc>,
    label: &str,
    json: bool,
) -> Result<(), AppError>
where
    S: VendorDataSource + 'static,
{
    info!(source = label, at = %now, "starting vendor risk review");
    let sink = Arc::new(InMemoryScoreSink::default());
    let service = RiskReviewService::new(source, sink.clone(), config.engine);
    let report = service.run(now)?;

    if json {
        println!("{}", to_json(&report.summary())?);
    } else {
        render_report(&report, label);
        println!("\nScores recorded: {}", sink.updates().len());
    }

    Ok(())
}

/// JSON is the only output in `--json` mode, so a failure here fails the command.
fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn render_report(report: &PortfolioReport, source: &str) {
    let summary = report.summary();

    println!("Vendor risk review");
    println!("Data source: {source}");
    println!(
        "Evaluated {} ({} vendors, {} not yet assessed)",
        summary.generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary.vendors,
        summary.unscored_vendors
    );

    println!("\nTier distribution");
    for entry in &summary.tier_distribution {
        println!("- {}: {}", entry.tier_label, entry.vendors);
    }

    if !summary.highest_risk.is_empty() {
        println!("\nHighest risk vendors");
        for vendor in &summary.highest_risk {
            println!(
                "- {} ({}): {} [{}] from {}/6 dimensions",
                vendor.vendor_name,
                vendor.vendor_id,
                vendor.score.unwrap_or_default(),
                vendor.tier_label.unwrap_or("Unscored"),
                vendor.assessed_dimensions
            );
        }
    }

    if summary.alerts.is_empty() {
        println!("\nObligation alerts: none");
    } else {
        println!("\nObligation alerts ({} critical)", report.critical_alerts());
        for alert in &summary.alerts {
            let timing = if alert.days_remaining < 0 {
                format!("{} days overdue", -alert.days_remaining)
            } else {
                format!("{} days left", alert.days_remaining)
            };
            println!(
                "- [{}] {} | {} | {} | due {} ({}, {})",
                alert.severity_label,
                alert.vendor_name,
                alert.kind_label,
                alert.label,
                alert.due_on,
                alert.status_label,
                timing
            );
        }
    }

    if !summary.workflows.is_empty() {
        println!("\nWorkflow progress");
        for workflow in &summary.workflows {
            println!(
                "- {} | {} | {}% | {}",
                workflow.vendor_name,
                workflow.subject,
                workflow.percent_complete,
                workflow.status_label
            );
            if !workflow.overdue_steps.is_empty() {
                println!("    overdue: {}", workflow.overdue_steps.join(", "));
            }
        }
    }

    if !summary.scorecards.is_empty() {
        println!("\nScorecards");
        for scorecard in &summary.scorecards {
            println!(
                "- {} {} | {} ({})",
                scorecard.period, scorecard.vendor_name, scorecard.score, scorecard.tier_label
            );
        }
    }

    let trends = [
        ("Incidents per month", &summary.incident_trend),
        ("Average incident impact", &summary.incident_impact_trend),
        ("Average scorecard", &summary.scorecard_trend),
    ];
    for (title, points) in trends {
        if points.is_empty() {
            continue;
        }
        println!("\n{title}");
        for point in points {
            println!("- {}: {:.1}", point.month, point.value);
        }
    }
}
