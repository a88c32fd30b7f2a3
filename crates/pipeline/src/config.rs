//! Pipeline configuration

use ocular::OcularConfig;
use ring_buffer::DEFAULT_CAPACITY;
use risk_classifier::ClassifierConfig;
use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of tracked samples kept in history
    pub history_capacity: usize,

    /// Per-frame metric thresholds and score weights
    pub ocular: OcularConfig,

    /// Aggregation, risk and recommendation settings
    pub classifier: ClassifierConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            ocular: OcularConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create strict config (tighter event and risk thresholds)
    pub fn strict() -> Self {
        Self {
            ocular: OcularConfig::strict(),
            classifier: ClassifierConfig::strict(),
            ..Default::default()
        }
    }

    /// Create lenient config (looser thresholds, longer history)
    pub fn lenient() -> Self {
        Self {
            history_capacity: 120,
            ocular: OcularConfig::lenient(),
            classifier: ClassifierConfig::lenient(),
        }
    }

    /// Whether history can ever grow long enough to classify
    pub fn can_classify(&self) -> bool {
        self.history_capacity >= self.classifier.min_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let config = PipelineConfig::default();
        assert_eq!(config.history_capacity, 60);
        assert!(config.can_classify());
    }

    #[test]
    fn test_capacity_below_minimum_history() {
        let config = PipelineConfig {
            history_capacity: 10,
            ..Default::default()
        };
        assert!(!config.can_classify());
    }

    #[test]
    fn test_presets_can_classify() {
        assert!(PipelineConfig::strict().can_classify());
        assert!(PipelineConfig::lenient().can_classify());
    }
}
