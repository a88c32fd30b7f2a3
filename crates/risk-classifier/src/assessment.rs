//! Cognitive assessment and the classifier that builds it

use crate::biomarkers::Biomarkers;
use crate::config::ClassifierConfig;
use crate::metrics::{AggregatedMetrics, MetricAggregator};
use crate::profiles::{profile_similarities, ProfileSimilarity};
use crate::recommendations::{recommendations, INSUFFICIENT_DATA};
use crate::risk::{categorize, risk_score, RiskCategory};
use crate::target_test::{apply_target_test, TargetTestResult};
use ocular::EyeSample;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Headline metrics shown alongside the assessment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub saccade_latency_ms: f64,
    pub pursuit_gain: f64,
    pub fixation_stability: f64,
    pub gaze_consistency: f64,
}

impl From<&AggregatedMetrics> for DetailedMetrics {
    fn from(m: &AggregatedMetrics) -> Self {
        Self {
            saccade_latency_ms: m.saccade_latency_ms,
            pursuit_gain: m.pursuit_gain,
            fixation_stability: m.fixation_stability,
            gaze_consistency: m.gaze_stability,
        }
    }
}

/// Risk assessment rebuilt from the full history on every classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveAssessment {
    pub risk_category: RiskCategory,
    /// In [0.3, 0.95]
    pub confidence: f64,
    pub biomarkers: Biomarkers,
    pub recommendations: Vec<String>,
    pub detailed_metrics: DetailedMetrics,
    /// Raw one-sided risk score in [0, 1]
    pub risk_score: f64,
    pub similarities: Vec<ProfileSimilarity>,
    /// Aggregated vector; absent without enough history
    pub metrics: Option<AggregatedMetrics>,
    /// History length the assessment was built from
    pub sample_count: usize,
    /// Whether a target-test result raised the category
    pub escalated_by_test: bool,
}

impl CognitiveAssessment {
    /// Fixed low-confidence assessment for short histories
    pub fn insufficient_data(sample_count: usize, config: &ClassifierConfig) -> Self {
        Self {
            risk_category: RiskCategory::Low,
            confidence: config.insufficient_confidence,
            biomarkers: Biomarkers::insufficient(config.insufficient_overall_score),
            recommendations: vec![INSUFFICIENT_DATA.to_string()],
            detailed_metrics: DetailedMetrics::default(),
            risk_score: 0.0,
            similarities: Vec::new(),
            metrics: None,
            sample_count,
            escalated_by_test: false,
        }
    }

    pub fn has_sufficient_data(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Pattern-similarity risk classifier
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    config: ClassifierConfig,
    aggregator: MetricAggregator,
}

impl RiskClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        info!(min_history = config.min_history, "Creating risk classifier");
        Self {
            aggregator: MetricAggregator::new(config.aggregation.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a history ordered oldest to newest
    pub fn classify(
        &self,
        history: &[EyeSample],
        target_test: Option<&TargetTestResult>,
    ) -> CognitiveAssessment {
        if history.len() < self.config.min_history {
            debug!(
                samples = history.len(),
                required = self.config.min_history,
                "Not enough history to classify"
            );
            return CognitiveAssessment::insufficient_data(history.len(), &self.config);
        }

        let metrics = self.aggregator.aggregate(history);
        let similarities = profile_similarities(&metrics, &self.config.similarity_weights);
        let score = risk_score(
            &metrics,
            &self.config.risk_weights,
            &self.config.risk_thresholds,
        );
        let (mut category, mut confidence) = categorize(score, &self.config);

        let mut escalated_by_test = false;
        if let Some(test) = target_test {
            let outcome = apply_target_test(category, confidence, test, &self.config);
            category = outcome.category;
            confidence = outcome.confidence;
            escalated_by_test = outcome.escalated;
        }

        let biomarkers = Biomarkers::compute(&metrics, &self.config.biomarkers);
        let recommendations =
            recommendations(category, &biomarkers, self.config.recommendation_cap);

        debug!(
            risk_score = score,
            category = %category,
            confidence,
            "Classified history"
        );

        CognitiveAssessment {
            risk_category: category,
            confidence,
            biomarkers,
            recommendations,
            detailed_metrics: DetailedMetrics::from(&metrics),
            risk_score: score,
            similarities,
            metrics: Some(metrics),
            sample_count: history.len(),
            escalated_by_test,
        }
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
