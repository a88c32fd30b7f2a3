//! Report payload

use crate::narration::EnhancedAssessment;
use crate::ReportError;
use chrono::{DateTime, Utc};
use ocular::{CognitiveStatus, EyeSample};
use risk_classifier::{AggregatedMetrics, LatencyAssessment, TargetTestResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a persistence collaborator receives for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub report: EnhancedAssessment,
    /// Raw aggregated metrics the assessment was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<AggregatedMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_sample: Option<EyeSample>,
    /// Band of the latest tracked instantaneous score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cognitive_status: Option<CognitiveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_test: Option<TargetTestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_assessment: Option<LatencyAssessment>,
}

impl ReportPayload {
    /// Stamp a report with a fresh id and the current time
    pub fn new(
        report: EnhancedAssessment,
        latest_sample: Option<EyeSample>,
        target_test: Option<TargetTestResult>,
    ) -> Self {
        let cognitive_status = latest_sample
            .as_ref()
            .filter(|sample| sample.is_tracked())
            .map(|sample| CognitiveStatus::from_score(sample.cognitive_score));
        let latency_assessment = target_test.as_ref().map(TargetTestResult::latency_assessment);

        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            metrics: report.assessment.metrics,
            report,
            latest_sample,
            cognitive_status,
            target_test,
            latency_assessment,
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_classifier::{ClassifierConfig, CognitiveAssessment};

    #[test]
    fn test_payload_json_shape() {
        let assessment = CognitiveAssessment::insufficient_data(3, &ClassifierConfig::default());
        let payload = ReportPayload::new(EnhancedAssessment::algorithmic(assessment), None, None);
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["id"], payload.id.to_string());
        assert_eq!(json["report"]["assessment"]["risk_category"], "low");
        assert_eq!(json["report"]["source"], "algorithmic");
        assert!(json.get("metrics").is_none());
        assert!(json.get("target_test").is_none());
    }

    #[test]
    fn test_payload_labels_target_test() {
        let assessment = CognitiveAssessment::insufficient_data(3, &ClassifierConfig::default());
        let test = TargetTestResult::from_trials(12, vec![400.0; 12]);
        let payload = ReportPayload::new(EnhancedAssessment::algorithmic(assessment), None, Some(test));
        assert_eq!(payload.latency_assessment, Some(LatencyAssessment::Delayed));
        // No tracked sample, no status band
        assert!(payload.cognitive_status.is_none());
    }

    #[test]
    fn test_payload_ids_unique() {
        let assessment = CognitiveAssessment::insufficient_data(0, &ClassifierConfig::default());
        let a = ReportPayload::new(EnhancedAssessment::algorithmic(assessment.clone()), None, None);
        let b = ReportPayload::new(EnhancedAssessment::algorithmic(assessment), None, None);
        assert_ne!(a.id, b.id);
    }
}
