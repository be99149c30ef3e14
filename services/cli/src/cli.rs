use crate::demo::{run_demo, run_report, run_tier, DemoArgs, ReportArgs, TierArgs};
use clap::{Parser, Subcommand};
use tracing::debug;
use vendor_risk::config::AppConfig;
use vendor_risk::error::AppError;
use vendor_risk::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "vendor-risk",
    about = "Score vendors, surface expiring obligations and track review progress",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Review a seeded sample portfolio (default command)
    Demo(DemoArgs),
    /// Review vendor and contract registers exported as CSV
    Report(ReportArgs),
    /// Classify a single score into a risk tier
    Tier(TierArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(
        environment = ?config.environment,
        thresholds = ?config.engine.thresholds,
        "configuration loaded"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config),
        Command::Report(args) => run_report(args, &config),
        Command::Tier(args) => run_tier(args, &config),
    }
}
