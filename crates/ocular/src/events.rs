//! Blink, saccade and fixation event detection

use crate::OcularConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Events flagged for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEvents {
    pub blink: bool,
    pub saccade: bool,
    /// Low movement and no saccade
    pub fixation: bool,
}

/// Event detector with saccade debounce
///
/// One instance per pipeline; the only state is the frame of the last
/// flagged saccade.
#[derive(Debug, Clone)]
pub struct EventDetector {
    blink_threshold: f64,
    saccade_velocity_threshold: f64,
    saccade_min_movement: f64,
    saccade_refractory_ms: f64,
    fixation_movement_threshold: f64,
    frame_interval_ms: f64,
    last_saccade_frame: Option<u64>,
}

impl EventDetector {
    pub fn new(config: &OcularConfig) -> Self {
        Self {
            blink_threshold: config.blink_threshold,
            saccade_velocity_threshold: config.saccade_velocity_threshold,
            saccade_min_movement: config.saccade_min_movement,
            saccade_refractory_ms: config.saccade_refractory_ms,
            fixation_movement_threshold: config.fixation_movement_threshold,
            frame_interval_ms: config.frame_interval_ms,
            last_saccade_frame: None,
        }
    }

    /// Classify one frame
    pub fn detect(
        &mut self,
        frame_index: u64,
        average_openness: f64,
        movement: f64,
        velocity: f64,
    ) -> FrameEvents {
        let blink = self.is_blink(average_openness);
        let saccade = self.detect_saccade(frame_index, movement, velocity);
        FrameEvents {
            blink,
            saccade,
            fixation: !saccade && movement < self.fixation_movement_threshold,
        }
    }

    pub fn is_blink(&self, average_openness: f64) -> bool {
        average_openness < self.blink_threshold
    }

    /// Flag a saccade when both thresholds are exceeded and the refractory
    /// period since the last flagged saccade has strictly elapsed
    pub fn detect_saccade(&mut self, frame_index: u64, movement: f64, velocity: f64) -> bool {
        if velocity <= self.saccade_velocity_threshold || movement <= self.saccade_min_movement {
            return false;
        }

        if let Some(last) = self.last_saccade_frame {
            let elapsed_ms = frame_index.saturating_sub(last) as f64 * self.frame_interval_ms;
            if elapsed_ms <= self.saccade_refractory_ms {
                debug!(frame_index, elapsed_ms, "Saccade suppressed by refractory period");
                return false;
            }
        }

        self.last_saccade_frame = Some(frame_index);
        true
    }

    pub fn last_saccade_frame(&self) -> Option<u64> {
        self.last_saccade_frame
    }

    /// Forget the last saccade (pipeline reset)
    pub fn reset(&mut self) {
        self.last_saccade_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> EventDetector {
        EventDetector::new(&OcularConfig::default())
    }

    #[test]
    fn test_blink_threshold() {
        let d = detector();
        assert!(d.is_blink(0.1));
        assert!(!d.is_blink(0.15));
        assert!(!d.is_blink(0.3));
    }

    #[test]
    fn test_saccades_50ms_apart_flag_only_first() {
        let mut d = detector();
        // 3 frames at 60 Hz = 50 ms
        assert!(d.detect_saccade(10, 0.03, 72.0));
        assert!(!d.detect_saccade(13, 0.03, 72.0));
        assert_eq!(d.last_saccade_frame(), Some(10));
    }

    #[test]
    fn test_saccades_150ms_apart_both_flag() {
        let mut d = detector();
        // 9 frames at 60 Hz = 150 ms
        assert!(d.detect_saccade(10, 0.03, 72.0));
        assert!(d.detect_saccade(19, 0.03, 72.0));
    }

    #[test]
    fn test_exactly_refractory_is_suppressed() {
        let config = OcularConfig {
            frame_interval_ms: 10.0,
            ..Default::default()
        };
        let mut d = EventDetector::new(&config);
        assert!(d.detect_saccade(0, 0.03, 72.0));
        assert!(!d.detect_saccade(10, 0.03, 72.0));
        assert!(d.detect_saccade(11, 0.03, 72.0));
    }

    #[test]
    fn test_requires_both_thresholds() {
        let mut d = detector();
        assert!(!d.detect_saccade(0, 0.005, 72.0));
        assert!(!d.detect_saccade(0, 0.03, 20.0));
        assert_eq!(d.last_saccade_frame(), None);
    }

    #[test]
    fn test_fixation_is_implicit() {
        let mut d = detector();
        let events = d.detect(0, 0.3, 0.001, 2.4);
        assert!(events.fixation);
        assert!(!events.saccade);

        let events = d.detect(1, 0.3, 0.03, 72.0);
        assert!(events.saccade);
        assert!(!events.fixation);
    }

    #[test]
    fn test_reset_clears_debounce() {
        let mut d = detector();
        assert!(d.detect_saccade(5, 0.03, 72.0));
        d.reset();
        assert!(d.detect_saccade(6, 0.03, 72.0));
    }
}
