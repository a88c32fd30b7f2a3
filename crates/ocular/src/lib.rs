//! Ocular Metrics
//!
//! Per-frame eye analysis from face-mesh landmarks:
//! - Eye aspect ratio (openness) and asymmetry
//! - Iris centroid and normalized gaze direction
//! - Movement, saccade velocity, gaze stability, fixation duration
//! - Blink / saccade / fixation events with saccade debounce
//! - Instantaneous cognitive score

pub mod calibration;
pub mod config;
pub mod events;
pub mod geometry;
pub mod sample;
pub mod scoring;
pub mod tracker;

pub use calibration::{CalibrationState, ScreenMapper};
pub use config::{OcularConfig, ScoreWeights};
pub use events::{EventDetector, FrameEvents};
pub use geometry::{eye_aspect_ratio, EyeGeometry, EyeMetricExtractor, FrameGeometry};
pub use sample::{EyeSample, Quadrant, SampleStatus, ScreenGaze};
pub use scoring::{cognitive_score, CognitiveStatus, ScoreInputs};
pub use tracker::{TemporalFeatures, TemporalTracker};

use landmarks::LandmarkError;
use thiserror::Error;

/// Ocular metric error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OcularError {
    #[error("Landmark {index} missing (frame has {len} points)")]
    MissingLandmark { index: usize, len: usize },

    #[error("Landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Eye index set is empty")]
    EmptyIndexSet,

    #[error("No tracked gaze sample available")]
    NoGazeSample,
}

impl From<LandmarkError> for OcularError {
    fn from(err: LandmarkError) -> Self {
        match err {
            LandmarkError::IndexOutOfRange { index, len } => {
                OcularError::MissingLandmark { index, len }
            }
            LandmarkError::NonFinite { index } => OcularError::NonFiniteCoordinate { index },
        }
    }
}
