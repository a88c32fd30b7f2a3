//! Per-domain biomarker impairments

use crate::config::BiomarkerConfig;
use crate::metrics::AggregatedMetrics;
use serde::{Deserialize, Serialize};

/// Impairment percentages (0 = unimpaired, 100 = fully impaired)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Biomarkers {
    pub saccade_impairment: f64,
    pub pursuit_impairment: f64,
    pub fixation_impairment: f64,
    pub velocity_impairment: f64,
    /// 100 minus the weighted impairments, in [0, 100]
    pub overall_score: f64,
}

impl Biomarkers {
    pub fn compute(metrics: &AggregatedMetrics, config: &BiomarkerConfig) -> Self {
        let saccade_impairment = percent(metrics.saccade_latency_ms / config.saccade_latency_ms);
        let pursuit_impairment = percent((1.0 - metrics.pursuit_gain) / config.pursuit_span);
        let fixation_impairment =
            percent((1.0 - metrics.fixation_stability) / config.fixation_span);
        let velocity_impairment = percent(
            (config.saccade_velocity - metrics.saccade_velocity) / config.saccade_velocity,
        );

        let [w_saccade, w_pursuit, w_fixation, w_velocity] = config.overall_weights;
        let weighted = saccade_impairment * w_saccade
            + pursuit_impairment * w_pursuit
            + fixation_impairment * w_fixation
            + velocity_impairment * w_velocity;

        Self {
            saccade_impairment,
            pursuit_impairment,
            fixation_impairment,
            velocity_impairment,
            overall_score: (100.0 - weighted).clamp(0.0, 100.0),
        }
    }

    /// Values reported when there is not enough history
    pub fn insufficient(overall_score: f64) -> Self {
        Self {
            overall_score,
            ..Default::default()
        }
    }
}

/// Fraction to clamped percentage
fn percent(fraction: f64) -> f64 {
    if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
