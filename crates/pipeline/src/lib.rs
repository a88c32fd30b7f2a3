//! Ocular Biomarker Pipeline
//!
//! Streams landmark frames through the per-frame metric stages and, once
//! enough history has accrued, the risk classifier:
//!
//! landmarks → geometry → temporal features → events → score → history
//! → (history ≥ minimum) → assessment

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{FrameOutput, OcularPipeline};

use ocular::{OcularError, SampleStatus};
use thiserror::Error;

/// Pipeline error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Ocular metric error: {0}")]
    Ocular(#[from] OcularError),

    #[error("Cannot calibrate on a {0:?} sample")]
    NotCalibratable(SampleStatus),
}
