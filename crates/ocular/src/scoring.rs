//! Instantaneous cognitive score

use crate::config::ScoreWeights;
use serde::{Deserialize, Serialize};

/// Inputs of the score, one value per term
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub average_openness: f64,
    pub asymmetry: f64,
    pub gaze_stability: f64,
    pub movement: f64,
    pub saccade_velocity: f64,
    pub fixation_duration_ms: f64,
}

/// Weighted linear score clamped to [0, 100]
///
/// Non-finite intermediate results score 0.
pub fn cognitive_score(inputs: &ScoreInputs, weights: &ScoreWeights) -> f64 {
    let openness_term =
        (inputs.average_openness - weights.expected_openness) * weights.openness_weight;
    let excess_velocity = (inputs.saccade_velocity - weights.velocity_ceiling).max(0.0);
    let fixation_s = inputs.fixation_duration_ms / 1000.0;

    let score = weights.baseline + openness_term - inputs.asymmetry * weights.asymmetry_penalty
        + inputs.gaze_stability * weights.stability_bonus
        - inputs.movement * weights.movement_penalty
        - excess_velocity * weights.velocity_penalty
        + fixation_s * weights.fixation_bonus_per_s;

    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Display band for an instantaneous score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveStatus {
    Optimal,
    Normal,
    Monitor,
    ConsultProfessional,
}

impl CognitiveStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            CognitiveStatus::Optimal
        } else if score >= 60.0 {
            CognitiveStatus::Normal
        } else if score >= 40.0 {
            CognitiveStatus::Monitor
        } else {
            CognitiveStatus::ConsultProfessional
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CognitiveStatus::Optimal => "Optimal",
            CognitiveStatus::Normal => "Normal",
            CognitiveStatus::Monitor => "Monitor",
            CognitiveStatus::ConsultProfessional => "Consult Professional",
        }
    }
}
