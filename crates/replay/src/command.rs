//! NDJSON session commands

use landmarks::{FrameInput, LandmarkFrame};
use risk_classifier::target_test::STANDARD_TARGET_COUNT;
use risk_classifier::TargetTestResult;
use serde::{Deserialize, Serialize};

/// One line of a recorded session
///
/// ```text
/// {"landmarks":[{"x":0.41,"y":0.38,"z":-0.02}, ...]}
/// {"no_face":true}
/// {"calibrate":true}
/// {"target_test":{"average_latency_ms":280.0,"accuracy_percent":91.7}}
/// {"target_test":{"targets_shown":12,"latencies_ms":[240.0,310.0]}}
/// {"reset":true}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayCommand {
    Landmarks(LandmarkFrame),
    NoFace(bool),
    Calibrate(bool),
    TargetTest(TargetTestInput),
    Reset(bool),
}

/// Target-test result as a summary or as raw trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetTestInput {
    Summary(TargetTestResult),
    /// `targets_shown` defaults to a standard 12-target run
    Trials {
        #[serde(default = "standard_target_count")]
        targets_shown: usize,
        latencies_ms: Vec<f64>,
    },
}

fn standard_target_count() -> usize {
    STANDARD_TARGET_COUNT
}

impl TargetTestInput {
    pub fn into_result(self) -> TargetTestResult {
        match self {
            TargetTestInput::Summary(result) => result,
            TargetTestInput::Trials {
                targets_shown,
                latencies_ms,
            } => TargetTestResult::from_trials(targets_shown, latencies_ms),
        }
    }
}

impl ReplayCommand {
    /// Parse one line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, serde_json::Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(line).map(Some)
    }

    /// Frame input carried by this command, if it is a detector tick
    pub fn frame_input(&self) -> Option<FrameInput> {
        match self {
            ReplayCommand::Landmarks(frame) => Some(FrameInput::Landmarks(frame.clone())),
            ReplayCommand::NoFace(true) => Some(FrameInput::NoFace),
            _ => None,
        }
    }
}
