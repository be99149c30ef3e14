pub mod config;
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod telemetry;
