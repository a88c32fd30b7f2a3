//! Risk Classifier
//!
//! Turns a history of eye samples into a cognitive assessment:
//! - Aggregated metrics vector (latency, pursuit, fixation, velocity proxies)
//! - Similarity to named reference profiles
//! - One-sided weighted risk score, category and confidence
//! - Escalation from a discrete target-acquisition test
//! - Biomarker impairments and recommendations

pub mod assessment;
pub mod biomarkers;
pub mod config;
pub mod metrics;
pub mod profiles;
pub mod recommendations;
pub mod risk;
pub mod target_test;

pub use assessment::{CognitiveAssessment, DetailedMetrics, RiskClassifier};
pub use biomarkers::Biomarkers;
pub use config::ClassifierConfig;
pub use metrics::{AggregatedMetrics, MetricAggregator};
pub use profiles::{ProfileSimilarity, ReferenceProfile, REFERENCE_PROFILES};
pub use risk::RiskCategory;
pub use target_test::{LatencyAssessment, TargetTestResult};
