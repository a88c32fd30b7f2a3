//! Reference biomarker profiles and pattern similarity

use crate::config::SimilarityWeights;
use crate::metrics::AggregatedMetrics;
use serde::{Deserialize, Serialize};

/// Guard against division by a zero expected value
const SIMILARITY_EPSILON: f64 = 0.001;

/// Expected metric values for a named reference state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceProfile {
    pub name: &'static str,
    pub expected: AggregatedMetrics,
}

pub const NORMAL: ReferenceProfile = ReferenceProfile {
    name: "normal",
    expected: AggregatedMetrics {
        saccade_latency_ms: 160.0,
        pursuit_gain: 0.92,
        fixation_stability: 0.88,
        antisaccade_errors: 0.12,
        blink_rate: 0.25,
        saccade_velocity: 45.0,
        fixation_duration_ms: 320.0,
        gaze_stability: 0.85,
        movement_variance: 0.08,
    },
};

pub const IMPAIRED_EARLY: ReferenceProfile = ReferenceProfile {
    name: "impaired-early",
    expected: AggregatedMetrics {
        saccade_latency_ms: 280.0,
        pursuit_gain: 0.58,
        fixation_stability: 0.38,
        antisaccade_errors: 0.68,
        blink_rate: 0.18,
        saccade_velocity: 28.0,
        fixation_duration_ms: 180.0,
        gaze_stability: 0.45,
        movement_variance: 0.25,
    },
};

pub const IMPAIRED_ADVANCED: ReferenceProfile = ReferenceProfile {
    name: "impaired-advanced",
    expected: AggregatedMetrics {
        saccade_latency_ms: 380.0,
        pursuit_gain: 0.32,
        fixation_stability: 0.18,
        antisaccade_errors: 0.82,
        blink_rate: 0.12,
        saccade_velocity: 18.0,
        fixation_duration_ms: 90.0,
        gaze_stability: 0.22,
        movement_variance: 0.42,
    },
};

/// All reference profiles, healthiest first
pub static REFERENCE_PROFILES: [ReferenceProfile; 3] = [NORMAL, IMPAIRED_EARLY, IMPAIRED_ADVANCED];

/// Similarity of a measured vector to one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSimilarity {
    pub profile: String,
    /// Weighted similarity in [0, 1]
    pub similarity: f64,
}

/// Weighted per-dimension similarity in [0, 1]
///
/// Each dimension scores `1 - min(|measured - expected| / (|expected| + eps), 1)`.
/// Movement variance is not compared.
pub fn pattern_similarity(
    measured: &AggregatedMetrics,
    profile: &ReferenceProfile,
    weights: &SimilarityWeights,
) -> f64 {
    let e = &profile.expected;
    let dimensions = [
        (measured.saccade_latency_ms, e.saccade_latency_ms, weights.saccade_latency),
        (measured.pursuit_gain, e.pursuit_gain, weights.pursuit_gain),
        (measured.fixation_stability, e.fixation_stability, weights.fixation_stability),
        (measured.antisaccade_errors, e.antisaccade_errors, weights.antisaccade_errors),
        (measured.blink_rate, e.blink_rate, weights.blink_rate),
        (measured.saccade_velocity, e.saccade_velocity, weights.saccade_velocity),
        (measured.fixation_duration_ms, e.fixation_duration_ms, weights.fixation_duration),
        (measured.gaze_stability, e.gaze_stability, weights.gaze_stability),
    ];

    let mut similarity = 0.0;
    let mut total_weight = 0.0;
    for (measured, expected, weight) in dimensions {
        if !measured.is_finite() {
            continue;
        }
        let normalized_diff = (measured - expected).abs() / (expected.abs() + SIMILARITY_EPSILON);
        similarity += (1.0 - normalized_diff.min(1.0)) * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        similarity / total_weight
    } else {
        0.0
    }
}

/// Similarity to every reference profile, in profile order
pub fn profile_similarities(
    measured: &AggregatedMetrics,
    weights: &SimilarityWeights,
) -> Vec<ProfileSimilarity> {
    REFERENCE_PROFILES
        .iter()
        .map(|profile| ProfileSimilarity {
            profile: profile.name.to_string(),
            similarity: pattern_similarity(measured, profile, weights),
        })
        .collect()
}
