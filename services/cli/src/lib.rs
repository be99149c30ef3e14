mod cli;
mod demo;
mod infra;

use vendor_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
