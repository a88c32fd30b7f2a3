//! Classifier configuration

use serde::{Deserialize, Serialize};

/// Per-metric weights of the one-sided risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub saccade_latency: f64,
    pub pursuit_gain: f64,
    pub fixation_stability: f64,
    pub antisaccade_errors: f64,
    pub saccade_velocity: f64,
    pub gaze_stability: f64,
    pub movement_variance: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            saccade_latency: 0.20,
            pursuit_gain: 0.18,
            fixation_stability: 0.16,
            antisaccade_errors: 0.14,
            saccade_velocity: 0.12,
            gaze_stability: 0.10,
            movement_variance: 0.10,
        }
    }
}

/// Boundaries past which a metric starts adding risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Latency above this adds risk (ms)
    pub saccade_latency_ms: f64,
    /// Latency span over which the latency penalty reaches full weight (ms)
    pub saccade_latency_span_ms: f64,
    /// Values below these add risk
    pub pursuit_gain: f64,
    pub fixation_stability: f64,
    pub saccade_velocity: f64,
    pub gaze_stability: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            saccade_latency_ms: 250.0,
            saccade_latency_span_ms: 200.0,
            pursuit_gain: 0.7,
            fixation_stability: 0.6,
            saccade_velocity: 35.0,
            gaze_stability: 0.6,
        }
    }
}

/// Per-dimension weights of profile similarity (sum to 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    pub saccade_latency: f64,
    pub pursuit_gain: f64,
    pub fixation_stability: f64,
    pub antisaccade_errors: f64,
    pub blink_rate: f64,
    pub saccade_velocity: f64,
    pub fixation_duration: f64,
    pub gaze_stability: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            saccade_latency: 0.18,
            pursuit_gain: 0.16,
            fixation_stability: 0.15,
            antisaccade_errors: 0.14,
            blink_rate: 0.08,
            saccade_velocity: 0.12,
            fixation_duration: 0.09,
            gaze_stability: 0.08,
        }
    }
}

/// Aggregation constants for turning history into one metrics vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Movement that counts as a saccade onset
    pub onset_movement: f64,
    /// Preceding movement below which the onset is counted
    pub onset_quiet_movement: f64,
    /// Latency attributed to each detected onset (ms)
    pub onset_latency_ms: f64,
    /// Latency when no onset is found (ms)
    pub default_latency_ms: f64,
    /// Pursuit gain = stability * (1 - movement * factor)
    pub pursuit_movement_factor: f64,
    pub pursuit_floor: f64,
    pub fixation_movement_threshold: f64,
    /// Fixation duration that counts as fully stable (ms)
    pub fixation_reference_ms: f64,
    pub fixation_stability_floor: f64,
    pub antisaccade_asymmetry_scale: f64,
    pub default_saccade_velocity: f64,
    pub default_fixation_duration_ms: f64,
    pub default_gaze_stability: f64,
    pub default_movement_variance: f64,
    pub movement_variance_scale: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            onset_movement: 0.02,
            onset_quiet_movement: 0.01,
            onset_latency_ms: 100.0,
            default_latency_ms: 200.0,
            pursuit_movement_factor: 5.0,
            pursuit_floor: 0.2,
            fixation_movement_threshold: 0.005,
            fixation_reference_ms: 300.0,
            fixation_stability_floor: 0.1,
            antisaccade_asymmetry_scale: 8.0,
            default_saccade_velocity: 40.0,
            default_fixation_duration_ms: 200.0,
            default_gaze_stability: 0.7,
            default_movement_variance: 0.1,
            movement_variance_scale: 100.0,
        }
    }
}

/// Reference values at which a biomarker counts as fully impaired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomarkerConfig {
    pub saccade_latency_ms: f64,
    pub pursuit_span: f64,
    pub fixation_span: f64,
    pub saccade_velocity: f64,
    /// Weights of the four impairments in the overall score
    pub overall_weights: [f64; 4],
}

impl Default for BiomarkerConfig {
    fn default() -> Self {
        Self {
            saccade_latency_ms: 400.0,
            pursuit_span: 0.8,
            fixation_span: 0.9,
            saccade_velocity: 40.0,
            overall_weights: [0.3, 0.25, 0.25, 0.2],
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// History length required before classifying
    pub min_history: usize,

    /// Risk score at or above which the category is high
    pub high_risk_score: f64,
    /// Risk score at or above which the category is medium
    pub medium_risk_score: f64,

    pub min_confidence: f64,
    pub max_confidence: f64,
    /// Confidence of the insufficient-data assessment
    pub insufficient_confidence: f64,
    /// Overall score reported without enough data
    pub insufficient_overall_score: f64,

    /// Target-test latency above which the category escalates (ms)
    pub test_latency_ceiling_ms: f64,
    /// Target-test accuracy below which the category escalates (%)
    pub test_accuracy_floor: f64,
    pub latency_confidence_bump: f64,
    pub accuracy_confidence_bump: f64,

    /// Maximum number of recommendations
    pub recommendation_cap: usize,

    pub risk_weights: RiskWeights,
    pub risk_thresholds: RiskThresholds,
    pub similarity_weights: SimilarityWeights,
    pub aggregation: AggregationConfig,
    pub biomarkers: BiomarkerConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_history: 30,
            high_risk_score: 0.7,
            medium_risk_score: 0.4,
            min_confidence: 0.3,
            max_confidence: 0.95,
            insufficient_confidence: 0.3,
            insufficient_overall_score: 75.0,
            test_latency_ceiling_ms: 320.0,
            test_accuracy_floor: 70.0,
            latency_confidence_bump: 0.1,
            accuracy_confidence_bump: 0.05,
            recommendation_cap: 6,
            risk_weights: RiskWeights::default(),
            risk_thresholds: RiskThresholds::default(),
            similarity_weights: SimilarityWeights::default(),
            aggregation: AggregationConfig::default(),
            biomarkers: BiomarkerConfig::default(),
        }
    }
}

impl ClassifierConfig {
    /// Create strict config (classify earlier, escalate sooner)
    pub fn strict() -> Self {
        Self {
            min_history: 20,
            high_risk_score: 0.6,
            medium_risk_score: 0.3,
            test_latency_ceiling_ms: 300.0,
            test_accuracy_floor: 80.0,
            ..Default::default()
        }
    }

    /// Create lenient config (more history, higher bars)
    pub fn lenient() -> Self {
        Self {
            min_history: 60,
            high_risk_score: 0.8,
            medium_risk_score: 0.5,
            test_latency_ceiling_ms: 350.0,
            test_accuracy_floor: 60.0,
            ..Default::default()
        }
    }
}
