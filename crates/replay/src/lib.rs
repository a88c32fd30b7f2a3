//! Ocular Session Replay
//!
//! Host for the ocular pipeline that reads recorded detector output as
//! NDJSON, prints per-frame samples and assessments as NDJSON, and hands
//! periodic assessments to the report sinks.

pub mod command;
pub mod runner;
pub mod settings;

pub use command::{ReplayCommand, TargetTestInput};
pub use runner::{ReplayEvent, ReplayRunner, ReplaySummary};
pub use settings::ReplaySettings;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Replay error types
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid log level: {0}")]
    LogLevel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Install the global tracing subscriber
pub fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
