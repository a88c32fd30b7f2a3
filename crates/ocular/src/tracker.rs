//! Temporal feature tracking over bounded history

use crate::geometry::FrameGeometry;
use crate::sample::EyeSample;
use crate::OcularConfig;
use feature_engine::variance_2d;
use ring_buffer::RingBuffer;
use serde::{Deserialize, Serialize};

/// Features that depend on the current frame and recent history
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    pub movement: f64,
    pub saccade_velocity: f64,
    pub gaze_stability: f64,
    pub fixation_duration_ms: f64,
}

/// Temporal feature tracker
///
/// Stateless apart from configuration; all memory lives in the history the
/// caller passes in.
#[derive(Debug, Clone)]
pub struct TemporalTracker {
    frame_interval_ms: f64,
    velocity_scale: f64,
    fixation_movement_threshold: f64,
    stability_window: usize,
    stability_min_samples: usize,
    stability_default: f64,
    stability_variance_scale: f64,
}

impl TemporalTracker {
    pub fn new(config: &OcularConfig) -> Self {
        Self {
            frame_interval_ms: config.frame_interval_ms,
            velocity_scale: config.velocity_scale,
            fixation_movement_threshold: config.fixation_movement_threshold,
            stability_window: config.stability_window.max(1),
            stability_min_samples: config.stability_min_samples,
            stability_default: config.stability_default,
            stability_variance_scale: config.stability_variance_scale,
        }
    }

    pub fn compute(
        &self,
        geometry: &FrameGeometry,
        history: &RingBuffer<EyeSample>,
    ) -> TemporalFeatures {
        let movement = self.movement(geometry, history.latest());
        TemporalFeatures {
            movement,
            saccade_velocity: self.velocity(movement),
            gaze_stability: self.gaze_stability(geometry, history),
            fixation_duration_ms: self.fixation_duration_ms(movement, history),
        }
    }

    /// Mean displacement of the two pupils since the previous sample
    pub fn movement(&self, geometry: &FrameGeometry, previous: Option<&EyeSample>) -> f64 {
        match previous {
            Some(prev) => {
                let left = geometry.left.pupil.distance(&prev.pupil_left);
                let right = geometry.right.pupil.distance(&prev.pupil_right);
                (left + right) / 2.0
            }
            None => 0.0,
        }
    }

    /// Movement per nominal frame interval, in pixel-equivalent units
    pub fn velocity(&self, movement: f64) -> f64 {
        let interval_s = self.frame_interval_ms / 1000.0;
        if interval_s <= 0.0 {
            return 0.0;
        }
        movement / interval_s * self.velocity_scale
    }

    /// 1 minus scaled gaze variance over the window ending at this frame
    pub fn gaze_stability(&self, geometry: &FrameGeometry, history: &RingBuffer<EyeSample>) -> f64 {
        let mut gazes: Vec<(f64, f64)> = history
            .iter_recent(self.stability_window - 1)
            .map(|s| (s.gaze_direction.x, s.gaze_direction.y))
            .collect();
        gazes.push((geometry.gaze_direction.x, geometry.gaze_direction.y));

        if gazes.len() < self.stability_min_samples {
            return self.stability_default;
        }

        match variance_2d(&gazes) {
            Some((vx, vy)) => {
                let stability = 1.0 - (vx + vy) * self.stability_variance_scale;
                if stability.is_nan() {
                    0.0
                } else {
                    stability.clamp(0.0, 1.0)
                }
            }
            None => self.stability_default,
        }
    }

    /// Run of low-motion samples ending at this frame, in milliseconds
    pub fn fixation_duration_ms(&self, movement: f64, history: &RingBuffer<EyeSample>) -> f64 {
        if movement >= self.fixation_movement_threshold {
            return 0.0;
        }
        let run = 1 + history
            .iter()
            .rev()
            .take_while(|s| s.movement < self.fixation_movement_threshold)
            .count();
        run as f64 * self.frame_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EyeGeometry;
    use landmarks::Point2;

    fn geometry_at(pupil: (f64, f64), gaze: (f64, f64)) -> FrameGeometry {
        let eye = EyeGeometry {
            pupil: Point2::new(pupil.0, pupil.1),
            ..Default::default()
        };
        FrameGeometry {
            left: eye,
            right: eye,
            gaze_direction: Point2::new(gaze.0, gaze.1),
            ..Default::default()
        }
    }

    fn sample(pupil: (f64, f64), gaze: (f64, f64), movement: f64) -> EyeSample {
        EyeSample {
            pupil_left: Point2::new(pupil.0, pupil.1),
            pupil_right: Point2::new(pupil.0, pupil.1),
            gaze_direction: Point2::new(gaze.0, gaze.1),
            movement,
            ..Default::default()
        }
    }

    fn tracker() -> TemporalTracker {
        TemporalTracker::new(&OcularConfig::default())
    }

    #[test]
    fn test_first_sample_has_no_movement() {
        let history = RingBuffer::new(60);
        let features = tracker().compute(&geometry_at((0.3, 0.4), (0.0, 0.0)), &history);
        assert_eq!(features.movement, 0.0);
        assert_eq!(features.saccade_velocity, 0.0);
        assert_eq!(features.gaze_stability, 0.8);
    }

    #[test]
    fn test_velocity_from_movement() {
        let mut history = RingBuffer::new(60);
        history.push(sample((0.30, 0.40), (0.0, 0.0), 0.0));
        let features = tracker().compute(&geometry_at((0.33, 0.40), (0.0, 0.0)), &history);
        assert!((features.movement - 0.03).abs() < 1e-12);
        // 0.03 / (1/60) * 40 = 72
        assert!((features.saccade_velocity - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_gaze_is_fully_stable() {
        let mut history = RingBuffer::new(60);
        for _ in 0..5 {
            history.push(sample((0.3, 0.4), (0.05, 0.02), 0.0));
        }
        let stability = tracker().gaze_stability(&geometry_at((0.3, 0.4), (0.05, 0.02)), &history);
        assert!((stability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scattered_gaze_is_unstable() {
        let mut history = RingBuffer::new(60);
        for i in 0..9 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            history.push(sample((0.3, 0.4), (0.2 * sign, -0.2 * sign), 0.0));
        }
        let stability = tracker().gaze_stability(&geometry_at((0.3, 0.4), (-0.2, 0.2)), &history);
        assert_eq!(stability, 0.0);
    }

    #[test]
    fn test_fixation_run_stops_at_high_motion() {
        let mut history = RingBuffer::new(60);
        history.push(sample((0.3, 0.4), (0.0, 0.0), 0.0));
        history.push(sample((0.3, 0.4), (0.0, 0.0), 0.05));
        history.push(sample((0.3, 0.4), (0.0, 0.0), 0.001));
        history.push(sample((0.3, 0.4), (0.0, 0.0), 0.002));

        let t = tracker();
        let interval = OcularConfig::default().frame_interval_ms;
        // Current + two low-motion samples before the jump
        assert!((t.fixation_duration_ms(0.0, &history) - 3.0 * interval).abs() < 1e-9);
        assert_eq!(t.fixation_duration_ms(0.01, &history), 0.0);
    }
}
