//! Per-frame eye sample

use landmarks::Point2;
use serde::{Deserialize, Serialize};

/// How a sample was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    /// Landmarks present and every metric measured this frame
    Tracked,
    /// Detector reported no face
    #[default]
    NoFace,
    /// Landmarks present but extraction failed (missing index, NaN)
    Degraded,
}

/// Screen region the gaze falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    #[default]
    Center,
}

/// Gaze projected onto the screen plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenGaze {
    /// Horizontal position (0 = left edge, 1 = right edge)
    pub x: f64,
    /// Vertical position (0 = top edge, 1 = bottom edge)
    pub y: f64,
    pub quadrant: Quadrant,
}

impl Default for ScreenGaze {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            quadrant: Quadrant::Center,
        }
    }
}

/// Eye metrics derived from one frame plus bounded history
///
/// Immutable once appended to history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeSample {
    /// Tick counter, incremented for every frame including no-face ticks
    pub frame_index: u64,
    pub status: SampleStatus,
    pub face_detected: bool,
    pub confidence: f64,

    pub left_openness: f64,
    pub right_openness: f64,
    pub average_openness: f64,
    pub asymmetry: f64,

    pub pupil_left: Point2,
    pub pupil_right: Point2,
    pub gaze_direction: Point2,
    pub screen_gaze: ScreenGaze,

    /// Mean pupil displacement since the previous tracked sample
    pub movement: f64,
    /// Pixel-equivalent speed at the nominal frame rate
    pub saccade_velocity: f64,

    pub is_blink: bool,
    pub saccade_detected: bool,
    pub is_fixation: bool,

    pub gaze_stability: f64,
    pub fixation_duration_ms: f64,

    /// Instantaneous score in [0, 100]
    pub cognitive_score: f64,
}

impl Default for EyeSample {
    fn default() -> Self {
        Self {
            frame_index: 0,
            status: SampleStatus::NoFace,
            face_detected: false,
            confidence: 0.0,
            left_openness: 0.0,
            right_openness: 0.0,
            average_openness: 0.0,
            asymmetry: 0.0,
            pupil_left: Point2::default(),
            pupil_right: Point2::default(),
            gaze_direction: Point2::default(),
            screen_gaze: ScreenGaze::default(),
            movement: 0.0,
            saccade_velocity: 0.0,
            is_blink: false,
            saccade_detected: false,
            is_fixation: false,
            gaze_stability: 0.0,
            fixation_duration_ms: 0.0,
            cognitive_score: 0.0,
        }
    }
}

impl EyeSample {
    /// Sample for a tick without usable landmarks
    ///
    /// Geometric fields carry over from `previous` (or defaults); per-frame
    /// event flags are cleared.
    pub fn carried_over(
        previous: Option<&EyeSample>,
        frame_index: u64,
        status: SampleStatus,
        confidence: f64,
    ) -> Self {
        let mut sample = previous.cloned().unwrap_or_default();
        sample.frame_index = frame_index;
        sample.status = status;
        sample.face_detected = status != SampleStatus::NoFace;
        sample.confidence = confidence;
        sample.is_blink = false;
        sample.saccade_detected = false;
        sample.is_fixation = false;
        sample
    }

    /// Only tracked samples enter history
    pub fn is_tracked(&self) -> bool {
        self.status == SampleStatus::Tracked
    }
}
