//! History aggregation into a single metrics vector

use crate::config::AggregationConfig;
use feature_engine::{mean, variance};
use ocular::EyeSample;
use serde::{Deserialize, Serialize};

/// Metrics vector compared against reference profiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    /// Saccade latency proxy (ms)
    pub saccade_latency_ms: f64,
    /// Smooth-pursuit gain proxy in [0.2, 1]
    pub pursuit_gain: f64,
    /// Fixation stability ratio in [0.1, 1]
    pub fixation_stability: f64,
    /// Antisaccade error proxy in [0, 1]
    pub antisaccade_errors: f64,
    /// Fraction of samples that are blinks
    pub blink_rate: f64,
    pub saccade_velocity: f64,
    pub fixation_duration_ms: f64,
    pub gaze_stability: f64,
    /// Scaled variance of per-sample movement, in [0, 1]
    pub movement_variance: f64,
}

/// Summarizes a history of samples
#[derive(Debug, Clone)]
pub struct MetricAggregator {
    config: AggregationConfig,
}

impl MetricAggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Aggregate samples ordered oldest to newest
    pub fn aggregate(&self, samples: &[EyeSample]) -> AggregatedMetrics {
        AggregatedMetrics {
            saccade_latency_ms: self.saccade_latency(samples),
            pursuit_gain: self.pursuit_gain(samples),
            fixation_stability: self.fixation_stability(samples),
            antisaccade_errors: self.antisaccade_errors(samples),
            blink_rate: self.blink_rate(samples),
            saccade_velocity: self.saccade_velocity(samples),
            fixation_duration_ms: self.fixation_duration(samples),
            gaze_stability: self.gaze_stability(samples),
            movement_variance: self.movement_variance(samples),
        }
    }

    /// Latency proxy from saccade onsets (a jump right after a quiet frame)
    ///
    /// Frame timestamps are nominal, so each onset contributes a fixed latency.
    pub fn saccade_latency(&self, samples: &[EyeSample]) -> f64 {
        let c = &self.config;
        let onsets = (2..samples.len())
            .filter(|&i| {
                samples[i].movement > c.onset_movement
                    && samples[i - 1].movement < c.onset_quiet_movement
            })
            .count();

        if onsets == 0 {
            c.default_latency_ms
        } else {
            c.onset_latency_ms
        }
    }

    pub fn pursuit_gain(&self, samples: &[EyeSample]) -> f64 {
        let stability = field_mean(samples, |s| s.gaze_stability).unwrap_or(0.0);
        let movement = field_mean(samples, |s| s.movement).unwrap_or(0.0);
        let gain = stability * (1.0 - movement * self.config.pursuit_movement_factor);
        clamp_or(gain, self.config.pursuit_floor, 1.0)
    }

    /// Share of low-motion samples times their mean fixation duration
    pub fn fixation_stability(&self, samples: &[EyeSample]) -> f64 {
        let c = &self.config;
        let fixations: Vec<f64> = samples
            .iter()
            .filter(|s| s.movement < c.fixation_movement_threshold)
            .map(|s| s.fixation_duration_ms)
            .collect();

        if samples.is_empty() {
            return c.fixation_stability_floor;
        }
        let ratio = fixations.len() as f64 / samples.len() as f64;
        let avg_duration = mean(&fixations).unwrap_or(0.0);
        clamp_or(
            ratio * (avg_duration / c.fixation_reference_ms),
            c.fixation_stability_floor,
            1.0,
        )
    }

    pub fn antisaccade_errors(&self, samples: &[EyeSample]) -> f64 {
        let asymmetry = field_mean(samples, |s| s.asymmetry).unwrap_or(0.0);
        (asymmetry * self.config.antisaccade_asymmetry_scale).min(1.0)
    }

    pub fn blink_rate(&self, samples: &[EyeSample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let blinks = samples.iter().filter(|s| s.is_blink).count();
        (blinks as f64 / samples.len() as f64).min(1.0)
    }

    /// Mean over samples that moved at all
    pub fn saccade_velocity(&self, samples: &[EyeSample]) -> f64 {
        let velocities: Vec<f64> = samples
            .iter()
            .map(|s| s.saccade_velocity)
            .filter(|&v| v > 0.0)
            .collect();
        mean(&velocities).unwrap_or(self.config.default_saccade_velocity)
    }

    pub fn fixation_duration(&self, samples: &[EyeSample]) -> f64 {
        field_mean(samples, |s| s.fixation_duration_ms)
            .unwrap_or(self.config.default_fixation_duration_ms)
    }

    pub fn gaze_stability(&self, samples: &[EyeSample]) -> f64 {
        field_mean(samples, |s| s.gaze_stability).unwrap_or(self.config.default_gaze_stability)
    }

    pub fn movement_variance(&self, samples: &[EyeSample]) -> f64 {
        if samples.len() < 2 {
            return self.config.default_movement_variance;
        }
        let movements: Vec<f64> = samples.iter().map(|s| s.movement).collect();
        let var = variance(&movements).unwrap_or(0.0);
        (var * self.config.movement_variance_scale).min(1.0)
    }
}

impl Default for MetricAggregator {
    fn default() -> Self {
        Self::new(AggregationConfig::default())
    }
}

fn field_mean(samples: &[EyeSample], field: impl Fn(&EyeSample) -> f64) -> Option<f64> {
    let values: Vec<f64> = samples.iter().map(field).collect();
    mean(&values)
}

fn clamp_or(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
