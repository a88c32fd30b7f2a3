//! Assessment Reporting
//!
//! Downstream side effects of a finished assessment:
//! - JSON report payloads with id and timestamp
//! - Optional narration decorator (never authoritative)
//! - Persistence sinks (in-memory, NDJSON file)
//! - Fire-and-forget dispatch that never blocks the frame loop

pub mod dispatcher;
pub mod narration;
pub mod payload;
pub mod sink;

pub use dispatcher::{DispatcherConfig, ReportDispatcher};
pub use narration::{
    AssessmentEnhancer, EnhancedAssessment, EnhancementRequest, Narrative, NarrativeEnhancement,
    NarrativeSource, Narrator,
};
pub use payload::ReportPayload;
pub use sink::{InMemorySink, JsonLinesSink, ReportSink};

use thiserror::Error;

/// Reporting error types
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink {sink} failed: {reason}")]
    Sink { sink: String, reason: String },

    #[error("Enhancement failed: {0}")]
    Enhancement(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),
}
