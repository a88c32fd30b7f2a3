//! Risk scoring and category mapping

use crate::config::{ClassifierConfig, RiskThresholds, RiskWeights};
use crate::metrics::AggregatedMetrics;
use serde::{Deserialize, Serialize};

/// Risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// One level up, saturating at high
    pub fn escalate(self) -> Self {
        match self {
            RiskCategory::Low => RiskCategory::Medium,
            RiskCategory::Medium | RiskCategory::High => RiskCategory::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sum of one-sided penalties, capped at 1
///
/// A metric on its healthy side of the threshold contributes nothing.
pub fn risk_score(metrics: &AggregatedMetrics, weights: &RiskWeights, t: &RiskThresholds) -> f64 {
    let below = |value: f64, threshold: f64| {
        if value < threshold && threshold > 0.0 {
            (threshold - value) / threshold
        } else {
            0.0
        }
    };

    let mut score = 0.0;

    if metrics.saccade_latency_ms > t.saccade_latency_ms && t.saccade_latency_span_ms > 0.0 {
        score += (metrics.saccade_latency_ms - t.saccade_latency_ms) / t.saccade_latency_span_ms
            * weights.saccade_latency;
    }
    score += below(metrics.pursuit_gain, t.pursuit_gain) * weights.pursuit_gain;
    score += below(metrics.fixation_stability, t.fixation_stability) * weights.fixation_stability;
    score += metrics.antisaccade_errors.max(0.0) * weights.antisaccade_errors;
    score += below(metrics.saccade_velocity, t.saccade_velocity) * weights.saccade_velocity;
    score += below(metrics.gaze_stability, t.gaze_stability) * weights.gaze_stability;
    score += metrics.movement_variance.max(0.0) * weights.movement_variance;

    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Category and in-band confidence for a risk score
pub fn categorize(score: f64, config: &ClassifierConfig) -> (RiskCategory, f64) {
    let (category, confidence) = if score >= config.high_risk_score {
        (
            RiskCategory::High,
            (0.8 + (score - config.high_risk_score) * 0.5).min(config.max_confidence),
        )
    } else if score >= config.medium_risk_score {
        (
            RiskCategory::Medium,
            0.75 + (score - config.medium_risk_score) * 0.3,
        )
    } else {
        (RiskCategory::Low, 0.8 - score * 0.2)
    };

    (
        category,
        confidence.clamp(config.min_confidence, config.max_confidence),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{IMPAIRED_ADVANCED, IMPAIRED_EARLY, NORMAL};
    use proptest::prelude::*;

    fn score(metrics: &AggregatedMetrics) -> f64 {
        risk_score(metrics, &RiskWeights::default(), &RiskThresholds::default())
    }

    #[test]
    fn test_healthy_side_adds_nothing() {
        let metrics = AggregatedMetrics {
            saccade_latency_ms: 100.0,
            pursuit_gain: 1.0,
            fixation_stability: 1.0,
            saccade_velocity: 50.0,
            gaze_stability: 1.0,
            ..Default::default()
        };
        assert_eq!(score(&metrics), 0.0);
    }

    #[test]
    fn test_latency_penalty_is_one_sided() {
        let base = AggregatedMetrics {
            pursuit_gain: 1.0,
            fixation_stability: 1.0,
            saccade_velocity: 50.0,
            gaze_stability: 1.0,
            ..Default::default()
        };
        let slow = AggregatedMetrics {
            saccade_latency_ms: 350.0,
            ..base
        };
        // (350 - 250) / 200 * 0.2
        assert!((score(&slow) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_profile_ordering() {
        let normal = score(&NORMAL.expected);
        let early = score(&IMPAIRED_EARLY.expected);
        let advanced = score(&IMPAIRED_ADVANCED.expected);
        assert!(normal < 0.4);
        assert!(normal < early && early < advanced);
        assert!(advanced >= 0.4);
    }

    #[test]
    fn test_category_bands() {
        let config = ClassifierConfig::default();
        assert_eq!(categorize(0.0, &config), (RiskCategory::Low, 0.8));
        let (cat, conf) = categorize(0.4, &config);
        assert_eq!(cat, RiskCategory::Medium);
        assert!((conf - 0.75).abs() < 1e-12);
        let (cat, conf) = categorize(1.0, &config);
        assert_eq!(cat, RiskCategory::High);
        assert!((conf - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_escalate_saturates() {
        assert_eq!(RiskCategory::Low.escalate(), RiskCategory::Medium);
        assert_eq!(RiskCategory::Medium.escalate(), RiskCategory::High);
        assert_eq!(RiskCategory::High.escalate(), RiskCategory::High);
    }

    proptest! {
        #[test]
        fn prop_confidence_bounded(score in -10.0f64..10.0) {
            let (_, confidence) = categorize(score, &ClassifierConfig::default());
            prop_assert!((0.3..=0.95).contains(&confidence));
        }
    }
}
