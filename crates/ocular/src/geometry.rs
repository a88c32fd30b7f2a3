//! Geometric eye-metric extraction
//!
//! Pure functions of a single landmark frame: aspect ratio, iris centroid,
//! eye box and gaze direction. Nothing here looks at history.

use crate::{OcularConfig, OcularError};
use landmarks::{EyeIndices, LandmarkFrame, Point2, LEFT_EYE, RIGHT_EYE};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Geometry of one eye
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeGeometry {
    /// Eye aspect ratio
    pub openness: f64,
    /// Iris centroid
    pub pupil: Point2,
    /// Center of the contour bounding box
    pub center: Point2,
    pub width: f64,
    pub height: f64,
}

impl EyeGeometry {
    /// Pupil offset from the box center, normalized per axis by box size
    ///
    /// A collapsed axis contributes 0 rather than dividing by zero.
    pub fn gaze_offset(&self) -> Point2 {
        let normalize = |offset: f64, extent: f64| {
            if extent > f64::EPSILON {
                offset / extent
            } else {
                0.0
            }
        };
        Point2::new(
            normalize(self.pupil.x - self.center.x, self.width),
            normalize(self.pupil.y - self.center.y, self.height),
        )
    }
}

/// Both eyes plus the derived binocular fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    pub left: EyeGeometry,
    pub right: EyeGeometry,
    pub average_openness: f64,
    /// |left - right| openness
    pub asymmetry: f64,
    /// Binocular mean of the per-eye gaze offsets
    pub gaze_direction: Point2,
}

/// Geometric eye-metric extractor
#[derive(Debug, Clone)]
pub struct EyeMetricExtractor {
    ear_fallback: f64,
    ear_max: f64,
    left: EyeIndices,
    right: EyeIndices,
}

impl EyeMetricExtractor {
    pub fn new(config: &OcularConfig) -> Self {
        Self {
            ear_fallback: config.ear_fallback,
            ear_max: config.ear_max,
            left: LEFT_EYE,
            right: RIGHT_EYE,
        }
    }

    /// Extract both eyes from a frame
    pub fn extract(&self, frame: &LandmarkFrame) -> Result<FrameGeometry, OcularError> {
        let left = self.measure_eye(frame, &self.left)?;
        let right = self.measure_eye(frame, &self.right)?;

        let left_gaze = left.gaze_offset();
        let right_gaze = right.gaze_offset();

        Ok(FrameGeometry {
            left,
            right,
            average_openness: (left.openness + right.openness) / 2.0,
            asymmetry: (left.openness - right.openness).abs(),
            gaze_direction: left_gaze.midpoint(&right_gaze),
        })
    }

    /// Measure a single eye
    pub fn measure_eye(
        &self,
        frame: &LandmarkFrame,
        eye: &EyeIndices,
    ) -> Result<EyeGeometry, OcularError> {
        let openness = eye_aspect_ratio(frame, eye, self.ear_fallback, self.ear_max)?;

        let iris = frame.select(&eye.iris)?;
        let pupil = Point2::centroid(&iris).ok_or(OcularError::EmptyIndexSet)?;

        let contour = frame.select(eye.contour)?;
        if contour.is_empty() {
            return Err(OcularError::EmptyIndexSet);
        }
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &contour {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Ok(EyeGeometry {
            openness,
            pupil,
            center: Point2::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}

/// Eye aspect ratio: mean lid-pair distance over corner-to-corner distance
///
/// Returns `fallback` when the corners coincide; otherwise the ratio is
/// clamped to `[0, max]`.
pub fn eye_aspect_ratio(
    frame: &LandmarkFrame,
    eye: &EyeIndices,
    fallback: f64,
    max: f64,
) -> Result<f64, OcularError> {
    let outer = frame.get(eye.outer_corner)?;
    let inner = frame.get(eye.inner_corner)?;
    let horizontal = outer.planar_distance(&inner);

    let mut vertical = 0.0;
    for (upper, lower) in eye.vertical_pairs {
        vertical += frame.get(upper)?.planar_distance(&frame.get(lower)?);
    }
    vertical /= eye.vertical_pairs.len() as f64;

    if horizontal <= f64::EPSILON {
        warn!(
            outer = eye.outer_corner,
            inner = eye.inner_corner,
            "Degenerate eye geometry, using fallback aspect ratio {}",
            fallback
        );
        return Ok(fallback);
    }

    let ear = vertical / horizontal;
    if !ear.is_finite() {
        warn!("Non-finite aspect ratio, using fallback {}", fallback);
        return Ok(fallback);
    }
    if ear > max {
        warn!(
            ear,
            horizontal,
            "Aspect ratio above {}, eye corners nearly coincide",
            max
        );
    }
    Ok(ear.min(max).max(0.0))
}
