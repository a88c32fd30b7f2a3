//! Recommendation and narrative text

use crate::biomarkers::Biomarkers;
use crate::risk::RiskCategory;

/// Recommendation for an assessment without enough history
pub const INSUFFICIENT_DATA: &str = "Insufficient data for analysis";

fn baseline(category: RiskCategory) -> [&'static str; 4] {
    match category {
        RiskCategory::High => [
            "Urgent consultation with neurologist recommended",
            "Comprehensive cognitive assessment advised",
            "Regular monitoring of daily functioning changes",
            "Consider brain imaging studies if not recently done",
        ],
        RiskCategory::Medium => [
            "Schedule appointment with healthcare provider",
            "Cognitive exercises and brain training recommended",
            "Monitor for memory and concentration changes",
            "Maintain healthy lifestyle with regular exercise",
        ],
        RiskCategory::Low => [
            "Continue regular health check-ups",
            "Maintain cognitive activities and social engagement",
            "Healthy Mediterranean diet may support brain health",
            "Regular physical activity supports cognitive function",
        ],
    }
}

/// Category baseline followed by biomarker-triggered entries, truncated to `cap`
pub fn recommendations(category: RiskCategory, biomarkers: &Biomarkers, cap: usize) -> Vec<String> {
    let mut list: Vec<String> = baseline(category).iter().map(|s| s.to_string()).collect();

    if biomarkers.saccade_impairment > 40.0 {
        list.push("Eye movement exercises may improve coordination".to_string());
    }
    if biomarkers.fixation_impairment > 50.0 {
        list.push("Focus and attention training could be beneficial".to_string());
    }
    if biomarkers.velocity_impairment > 30.0 {
        list.push("Visual tracking exercises may help eye movement speed".to_string());
    }

    list.truncate(cap);
    list
}

/// Observed patterns worth narrating
pub fn observed_patterns(biomarkers: &Biomarkers) -> Vec<String> {
    let mut patterns = Vec::new();
    if biomarkers.saccade_impairment > 40.0 {
        patterns.push("Delayed saccadic eye movements observed".to_string());
    }
    if biomarkers.pursuit_impairment > 50.0 {
        patterns.push("Reduced smooth pursuit tracking capability".to_string());
    }
    if biomarkers.fixation_impairment > 30.0 {
        patterns.push("Decreased fixation stability during visual tasks".to_string());
    }
    patterns
}

/// Guidance text for a category
pub fn professional_guidance(category: RiskCategory) -> &'static str {
    match category {
        RiskCategory::Low => {
            "These results appear within normal ranges for cognitive screening. \
             Continue regular health check-ups and maintain cognitive activities."
        }
        RiskCategory::Medium => {
            "Some patterns suggest further evaluation may be beneficial. \
             Please share these results with your healthcare provider for personalized assessment."
        }
        RiskCategory::High => {
            "These patterns indicate that professional neurological evaluation is recommended. \
             Please consult with a specialist for comprehensive assessment."
        }
    }
}
