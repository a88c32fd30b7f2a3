//! Narration decorator
//!
//! The algorithmic category, confidence and biomarkers are authoritative.
//! An enhancer may only rewrite the narrative text around them.

use crate::ReportError;
use async_trait::async_trait;
use risk_classifier::recommendations::{observed_patterns, professional_guidance};
use risk_classifier::{Biomarkers, CognitiveAssessment, DetailedMetrics, RiskCategory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on a single enhancement call
pub const DEFAULT_ENHANCEMENT_TIMEOUT_MS: u64 = 5_000;

/// Human-readable text accompanying an assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub patterns: Vec<String>,
    pub recommendations: Vec<String>,
    pub professional_guidance: String,
}

impl Narrative {
    /// Narrative derived from the assessment alone
    pub fn algorithmic(assessment: &CognitiveAssessment) -> Self {
        Self {
            patterns: observed_patterns(&assessment.biomarkers),
            recommendations: assessment.recommendations.clone(),
            professional_guidance: professional_guidance(assessment.risk_category).to_string(),
        }
    }

    /// Overlay enhancer-provided fields; empty replacements are ignored
    fn apply(mut self, enhancement: NarrativeEnhancement) -> Self {
        if let Some(patterns) = enhancement.patterns.filter(|p| !p.is_empty()) {
            self.patterns = patterns;
        }
        if let Some(recommendations) = enhancement.recommendations.filter(|r| !r.is_empty()) {
            self.recommendations = recommendations;
        }
        if let Some(guidance) = enhancement
            .professional_guidance
            .filter(|g| !g.trim().is_empty())
        {
            self.professional_guidance = guidance;
        }
        self
    }
}

/// What an enhancer is allowed to see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub risk_category: RiskCategory,
    pub confidence: f64,
    pub biomarkers: Biomarkers,
    pub detailed_metrics: DetailedMetrics,
    pub narrative: Narrative,
}

impl EnhancementRequest {
    pub fn from_assessment(assessment: &CognitiveAssessment, narrative: &Narrative) -> Self {
        Self {
            risk_category: assessment.risk_category,
            confidence: assessment.confidence,
            biomarkers: assessment.biomarkers,
            detailed_metrics: assessment.detailed_metrics,
            narrative: narrative.clone(),
        }
    }

    /// Plain-text summary suitable as a prompt for a text generator
    pub fn summary(&self) -> String {
        let d = &self.detailed_metrics;
        format!(
            "Risk category: {} (confidence {:.0}%). Overall score {:.0}. \
             Saccade latency {:.0} ms, pursuit gain {:.2}, fixation stability {:.2}, \
             gaze consistency {:.2}.",
            self.risk_category,
            self.confidence * 100.0,
            self.biomarkers.overall_score,
            d.saccade_latency_ms,
            d.pursuit_gain,
            d.fixation_stability,
            d.gaze_consistency,
        )
    }
}

/// Replacement narrative fields; `None` keeps the algorithmic text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEnhancement {
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub professional_guidance: Option<String>,
}

/// External text generator for assessment narratives
#[async_trait]
pub trait AssessmentEnhancer: Send + Sync {
    fn name(&self) -> &str;

    async fn enhance(
        &self,
        request: &EnhancementRequest,
    ) -> Result<NarrativeEnhancement, ReportError>;
}

/// Where the narrative of a report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Algorithmic,
    Enhanced,
}

/// Assessment plus its narrative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedAssessment {
    pub assessment: CognitiveAssessment,
    pub narrative: Narrative,
    pub source: NarrativeSource,
}

impl EnhancedAssessment {
    pub fn algorithmic(assessment: CognitiveAssessment) -> Self {
        Self {
            narrative: Narrative::algorithmic(&assessment),
            assessment,
            source: NarrativeSource::Algorithmic,
        }
    }
}

/// Builds narratives, consulting an enhancer when one is configured
#[derive(Clone)]
pub struct Narrator {
    enhancer: Option<Arc<dyn AssessmentEnhancer>>,
    timeout: Duration,
}

impl Narrator {
    /// Narrator that never calls out
    pub fn algorithmic() -> Self {
        Self {
            enhancer: None,
            timeout: Duration::from_millis(DEFAULT_ENHANCEMENT_TIMEOUT_MS),
        }
    }

    pub fn with_enhancer(enhancer: Arc<dyn AssessmentEnhancer>, timeout: Duration) -> Self {
        Self {
            enhancer: Some(enhancer),
            timeout,
        }
    }

    pub fn has_enhancer(&self) -> bool {
        self.enhancer.is_some()
    }

    /// Narrate an assessment; any enhancer failure falls back to the algorithmic text
    pub async fn narrate(&self, assessment: CognitiveAssessment) -> EnhancedAssessment {
        let Some(enhancer) = &self.enhancer else {
            return EnhancedAssessment::algorithmic(assessment);
        };

        let base = Narrative::algorithmic(&assessment);
        let request = EnhancementRequest::from_assessment(&assessment, &base);

        match self.call(enhancer.as_ref(), &request).await {
            Ok(enhancement) => {
                debug!(enhancer = enhancer.name(), "Narrative enhanced");
                EnhancedAssessment {
                    narrative: base.apply(enhancement),
                    assessment,
                    source: NarrativeSource::Enhanced,
                }
            }
            Err(e) => {
                warn!(enhancer = enhancer.name(), "Narrative enhancement failed: {}", e);
                EnhancedAssessment {
                    narrative: base,
                    assessment,
                    source: NarrativeSource::Algorithmic,
                }
            }
        }
    }

    async fn call(
        &self,
        enhancer: &dyn AssessmentEnhancer,
        request: &EnhancementRequest,
    ) -> Result<NarrativeEnhancement, ReportError> {
        tokio::time::timeout(self.timeout, enhancer.enhance(request))
            .await
            .map_err(|_| ReportError::Timeout(self.timeout.as_millis() as u64))?
    }
}

impl Default for Narrator {
    fn default() -> Self {
        Self::algorithmic()
    }
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("enhancer", &self.enhancer.as_ref().map(|e| e.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
