//! Ocular metric configuration

use serde::{Deserialize, Serialize};

/// Named defaults for every threshold and coefficient
pub mod constants {
    /// Nominal capture rate; velocity math assumes this fixed cadence
    pub const NOMINAL_FRAME_RATE_HZ: f64 = 60.0;
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / NOMINAL_FRAME_RATE_HZ;

    /// Aspect ratio reported when the eye corners coincide
    pub const EAR_FALLBACK: f64 = 0.3;
    /// Upper bound on a reported aspect ratio; a wide-open eye stays well below it
    pub const EAR_MAX: f64 = 1.0;
    pub const BLINK_THRESHOLD: f64 = 0.15;

    pub const TRACKED_CONFIDENCE: f64 = 0.85;
    pub const DEGRADED_CONFIDENCE: f64 = 0.3;

    /// Normalized units per second to pixel-equivalent units
    pub const VELOCITY_SCALE: f64 = 40.0;
    pub const SACCADE_VELOCITY_THRESHOLD: f64 = 30.0;
    pub const SACCADE_MIN_MOVEMENT: f64 = 0.01;
    pub const SACCADE_REFRACTORY_MS: f64 = 100.0;

    pub const FIXATION_MOVEMENT_THRESHOLD: f64 = 0.005;

    pub const STABILITY_WINDOW: usize = 10;
    pub const STABILITY_MIN_SAMPLES: usize = 3;
    pub const STABILITY_DEFAULT: f64 = 0.8;
    pub const STABILITY_VARIANCE_SCALE: f64 = 20.0;

    pub const UNCALIBRATED_GAIN: f64 = 2.0;
    pub const CALIBRATION_RANGE: f64 = 0.3;
    pub const QUADRANT_LOW: f64 = 0.4;
    pub const QUADRANT_HIGH: f64 = 0.6;

    pub const SCORE_BASELINE: f64 = 70.0;
    pub const SCORE_EXPECTED_OPENNESS: f64 = 0.25;
    pub const SCORE_OPENNESS_WEIGHT: f64 = 100.0;
    pub const SCORE_ASYMMETRY_PENALTY: f64 = 300.0;
    pub const SCORE_STABILITY_BONUS: f64 = 15.0;
    pub const SCORE_MOVEMENT_PENALTY: f64 = 200.0;
    pub const SCORE_VELOCITY_CEILING: f64 = 60.0;
    pub const SCORE_VELOCITY_PENALTY: f64 = 0.1;
    pub const SCORE_FIXATION_BONUS_PER_S: f64 = 2.0;
}

use constants::*;

/// Coefficients of the instantaneous cognitive score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub baseline: f64,
    pub expected_openness: f64,
    pub openness_weight: f64,
    pub asymmetry_penalty: f64,
    pub stability_bonus: f64,
    pub movement_penalty: f64,
    /// Velocity above this is penalized
    pub velocity_ceiling: f64,
    pub velocity_penalty: f64,
    pub fixation_bonus_per_s: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            baseline: SCORE_BASELINE,
            expected_openness: SCORE_EXPECTED_OPENNESS,
            openness_weight: SCORE_OPENNESS_WEIGHT,
            asymmetry_penalty: SCORE_ASYMMETRY_PENALTY,
            stability_bonus: SCORE_STABILITY_BONUS,
            movement_penalty: SCORE_MOVEMENT_PENALTY,
            velocity_ceiling: SCORE_VELOCITY_CEILING,
            velocity_penalty: SCORE_VELOCITY_PENALTY,
            fixation_bonus_per_s: SCORE_FIXATION_BONUS_PER_S,
        }
    }
}

/// Ocular metric configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcularConfig {
    /// Assumed time between frames (milliseconds)
    pub frame_interval_ms: f64,

    /// Aspect ratio used for degenerate eye geometry
    pub ear_fallback: f64,

    /// Aspect ratios above this are clamped (near-coincident corners)
    pub ear_max: f64,

    /// Average aspect ratio below which a frame is a blink
    pub blink_threshold: f64,

    /// Confidence attached to fully tracked samples
    pub tracked_confidence: f64,

    /// Confidence attached to no-face and degraded samples
    pub degraded_confidence: f64,

    pub velocity_scale: f64,
    pub saccade_velocity_threshold: f64,
    pub saccade_min_movement: f64,

    /// Minimum time between two flagged saccades (milliseconds, strictly exceeded)
    pub saccade_refractory_ms: f64,

    pub fixation_movement_threshold: f64,

    /// Gaze stability window, current sample included
    pub stability_window: usize,
    pub stability_min_samples: usize,
    pub stability_default: f64,
    pub stability_variance_scale: f64,

    /// Linear screen expansion without calibration
    pub uncalibrated_gain: f64,

    /// Gaze range mapped onto half the screen once calibrated
    pub calibration_range: f64,

    pub quadrant_low: f64,
    pub quadrant_high: f64,

    pub score: ScoreWeights,
}

impl Default for OcularConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,
            ear_fallback: EAR_FALLBACK,
            ear_max: EAR_MAX,
            blink_threshold: BLINK_THRESHOLD,
            tracked_confidence: TRACKED_CONFIDENCE,
            degraded_confidence: DEGRADED_CONFIDENCE,
            velocity_scale: VELOCITY_SCALE,
            saccade_velocity_threshold: SACCADE_VELOCITY_THRESHOLD,
            saccade_min_movement: SACCADE_MIN_MOVEMENT,
            saccade_refractory_ms: SACCADE_REFRACTORY_MS,
            fixation_movement_threshold: FIXATION_MOVEMENT_THRESHOLD,
            stability_window: STABILITY_WINDOW,
            stability_min_samples: STABILITY_MIN_SAMPLES,
            stability_default: STABILITY_DEFAULT,
            stability_variance_scale: STABILITY_VARIANCE_SCALE,
            uncalibrated_gain: UNCALIBRATED_GAIN,
            calibration_range: CALIBRATION_RANGE,
            quadrant_low: QUADRANT_LOW,
            quadrant_high: QUADRANT_HIGH,
            score: ScoreWeights::default(),
        }
    }
}

impl OcularConfig {
    /// Create strict config (more events flagged)
    pub fn strict() -> Self {
        Self {
            blink_threshold: 0.18,
            saccade_velocity_threshold: 25.0,
            saccade_refractory_ms: 80.0,
            fixation_movement_threshold: 0.004,
            ..Default::default()
        }
    }

    /// Create lenient config (fewer events flagged)
    pub fn lenient() -> Self {
        Self {
            blink_threshold: 0.12,
            saccade_velocity_threshold: 40.0,
            saccade_refractory_ms: 150.0,
            fixation_movement_threshold: 0.008,
            ..Default::default()
        }
    }

    /// Frame interval in seconds
    pub fn frame_interval_s(&self) -> f64 {
        self.frame_interval_ms / 1000.0
    }
}
