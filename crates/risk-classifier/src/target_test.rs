//! Discrete target-acquisition test results and escalation

use crate::config::ClassifierConfig;
use crate::risk::RiskCategory;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Number of targets in a standard test run
pub const STANDARD_TARGET_COUNT: usize = 12;

/// Result of one completed target-acquisition test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetTestResult {
    pub average_latency_ms: f64,
    pub accuracy_percent: f64,
    #[serde(default)]
    pub per_trial_latencies_ms: Vec<f64>,
}

impl TargetTestResult {
    /// Build from the targets shown and the reaction latency of each
    /// acquired target
    pub fn from_trials(targets_shown: usize, acquired_latencies_ms: Vec<f64>) -> Self {
        let average_latency_ms = if acquired_latencies_ms.is_empty() {
            0.0
        } else {
            acquired_latencies_ms.iter().sum::<f64>() / acquired_latencies_ms.len() as f64
        };
        let accuracy_percent = if targets_shown == 0 {
            0.0
        } else {
            (acquired_latencies_ms.len() as f64 / targets_shown as f64 * 100.0).min(100.0)
        };

        Self {
            average_latency_ms,
            accuracy_percent,
            per_trial_latencies_ms: acquired_latencies_ms,
        }
    }

    pub fn latency_assessment(&self) -> LatencyAssessment {
        LatencyAssessment::from_latency(self.average_latency_ms)
    }
}

/// Coarse label for the average reaction latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyAssessment {
    Excellent,
    Normal,
    Delayed,
}

impl LatencyAssessment {
    pub fn from_latency(latency_ms: f64) -> Self {
        if latency_ms < 250.0 {
            LatencyAssessment::Excellent
        } else if latency_ms < 350.0 {
            LatencyAssessment::Normal
        } else {
            LatencyAssessment::Delayed
        }
    }
}

/// Outcome of blending a test result into a classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escalation {
    pub category: RiskCategory,
    pub confidence: f64,
    pub escalated: bool,
}

/// Escalate (never demote) by one level on slow or inaccurate results
pub fn apply_target_test(
    category: RiskCategory,
    confidence: f64,
    test: &TargetTestResult,
    config: &ClassifierConfig,
) -> Escalation {
    let bump = if test.average_latency_ms > config.test_latency_ceiling_ms {
        Some(config.latency_confidence_bump)
    } else if test.accuracy_percent < config.test_accuracy_floor {
        Some(config.accuracy_confidence_bump)
    } else {
        None
    };

    match bump {
        Some(bump) => {
            let escalated = category.escalate();
            info!(
                from = %category,
                to = %escalated,
                latency_ms = test.average_latency_ms,
                accuracy = test.accuracy_percent,
                "Target test escalated risk category"
            );
            Escalation {
                category: escalated,
                confidence: (confidence + bump).min(config.max_confidence),
                escalated: escalated != category,
            }
        }
        None => Escalation {
            category,
            confidence,
            escalated: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_trials() {
        let result = TargetTestResult::from_trials(12, vec![200.0, 300.0, 250.0]);
        assert_eq!(result.average_latency_ms, 250.0);
        assert_eq!(result.accuracy_percent, 25.0);
        assert_eq!(result.latency_assessment(), LatencyAssessment::Normal);
    }

    #[test]
    fn test_from_no_trials() {
        let result = TargetTestResult::from_trials(0, vec![]);
        assert_eq!(result.average_latency_ms, 0.0);
        assert_eq!(result.accuracy_percent, 0.0);
    }

    #[test]
    fn test_slow_latency_escalates_low() {
        let test = TargetTestResult {
            average_latency_ms: 400.0,
            accuracy_percent: 100.0,
            per_trial_latencies_ms: vec![],
        };
        let out = apply_target_test(RiskCategory::Low, 0.8, &test, &ClassifierConfig::default());
        assert_eq!(out.category, RiskCategory::Medium);
        assert!((out.confidence - 0.9).abs() < 1e-12);
        assert!(out.escalated);
    }

    #[test]
    fn test_poor_accuracy_escalates() {
        let test = TargetTestResult::from_trials(12, vec![200.0; 6]);
        let out = apply_target_test(RiskCategory::Medium, 0.8, &test, &ClassifierConfig::default());
        assert_eq!(out.category, RiskCategory::High);
        assert!((out.confidence - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_good_result_never_demotes() {
        let test = TargetTestResult::from_trials(12, vec![180.0; 12]);
        let out = apply_target_test(RiskCategory::High, 0.9, &test, &ClassifierConfig::default());
        assert_eq!(out.category, RiskCategory::High);
        assert_eq!(out.confidence, 0.9);
        assert!(!out.escalated);
    }

    proptest! {
        #[test]
        fn prop_escalation_only(
            latency in 0.0f64..1000.0,
            accuracy in 0.0f64..100.0,
            confidence in 0.3f64..0.95,
            level in 0usize..3,
        ) {
            let category = [RiskCategory::Low, RiskCategory::Medium, RiskCategory::High][level];
            let test = TargetTestResult {
                average_latency_ms: latency,
                accuracy_percent: accuracy,
                per_trial_latencies_ms: vec![],
            };
            let out = apply_target_test(category, confidence, &test, &ClassifierConfig::default());
            prop_assert!(out.category >= category);
            prop_assert!(out.confidence >= confidence);
            prop_assert!(out.confidence <= 0.95);
        }
    }
}
