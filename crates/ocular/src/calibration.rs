//! Gaze calibration and screen projection

use crate::sample::{Quadrant, ScreenGaze};
use crate::OcularConfig;
use landmarks::Point2;
use serde::{Deserialize, Serialize};

/// Calibration record: the gaze direction that maps to screen center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationState {
    pub center: Point2,
    /// Gaze offset from `center` that reaches a screen edge
    pub range: f64,
}

impl CalibrationState {
    pub fn new(center: Point2, range: f64) -> Self {
        Self { center, range }
    }
}

/// Projects gaze direction onto screen coordinates
#[derive(Debug, Clone)]
pub struct ScreenMapper {
    uncalibrated_gain: f64,
    quadrant_low: f64,
    quadrant_high: f64,
}

impl ScreenMapper {
    pub fn new(config: &OcularConfig) -> Self {
        Self {
            uncalibrated_gain: config.uncalibrated_gain,
            quadrant_low: config.quadrant_low,
            quadrant_high: config.quadrant_high,
        }
    }

    /// Map a gaze direction, recentring on the calibration when present
    pub fn project(&self, gaze: Point2, calibration: Option<&CalibrationState>) -> ScreenGaze {
        let (x, y) = match calibration {
            Some(cal) if cal.range > f64::EPSILON => (
                0.5 + (gaze.x - cal.center.x) / cal.range * 0.5,
                0.5 + (gaze.y - cal.center.y) / cal.range * 0.5,
            ),
            Some(cal) => (
                0.5 + (gaze.x - cal.center.x) * self.uncalibrated_gain,
                0.5 + (gaze.y - cal.center.y) * self.uncalibrated_gain,
            ),
            None => (
                0.5 + gaze.x * self.uncalibrated_gain,
                0.5 + gaze.y * self.uncalibrated_gain,
            ),
        };

        let x = clamp_unit(x);
        let y = clamp_unit(y);
        ScreenGaze {
            x,
            y,
            quadrant: self.quadrant(x, y),
        }
    }

    /// Quadrant for a screen position; anything in the middle band is center
    pub fn quadrant(&self, x: f64, y: f64) -> Quadrant {
        let left = x < self.quadrant_low;
        let right = x > self.quadrant_high;
        let top = y < self.quadrant_low;
        let bottom = y > self.quadrant_high;

        match (left, right, top, bottom) {
            (true, _, true, _) => Quadrant::TopLeft,
            (_, true, true, _) => Quadrant::TopRight,
            (true, _, _, true) => Quadrant::BottomLeft,
            (_, true, _, true) => Quadrant::BottomRight,
            _ => Quadrant::Center,
        }
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.5
    } else {
        v.clamp(0.0, 1.0)
    }
}
