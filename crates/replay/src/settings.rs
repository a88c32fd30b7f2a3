//! Replay settings

use crate::ReplayError;
use config::{Config, Environment, File};
use pipeline::PipelineConfig;
use reporting::DispatcherConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// Settings file read when `OCULAR_REPLAY_CONFIG` is unset
pub const DEFAULT_SETTINGS_FILE: &str = "ocular-replay.toml";

/// Environment variable naming an alternative settings file
pub const SETTINGS_PATH_VAR: &str = "OCULAR_REPLAY_CONFIG";

/// Prefix for environment overrides, e.g. `OCULAR_REPLAY__LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "OCULAR_REPLAY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    pub log_level: String,
    /// NDJSON session file; stdin when absent
    pub input: Option<PathBuf>,
    /// NDJSON file receiving reports; in-memory only when absent
    pub report_path: Option<PathBuf>,
    /// Dispatch a report every N frames that carry an assessment (0 = end of input only)
    pub report_every: u64,
    pub report_retention: usize,
    pub pipeline: PipelineConfig,
    pub dispatcher: DispatcherConfig,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            input: None,
            report_path: None,
            report_every: 60,
            report_retention: 100,
            pipeline: PipelineConfig::default(),
            dispatcher: DispatcherConfig::default(),
        }
    }
}

impl ReplaySettings {
    /// Load from the default file (or `OCULAR_REPLAY_CONFIG`) plus environment
    pub fn load() -> Result<Self, ReplayError> {
        let path = std::env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from a specific file; a missing file falls back to defaults
    pub fn load_from(path: &str) -> Result<Self, ReplayError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn level(&self) -> Result<Level, ReplayError> {
        Level::from_str(&self.log_level).map_err(|_| ReplayError::LogLevel(self.log_level.clone()))
    }
}
