//! Entity resolver tuning.

use recon_core::enums::SimilarityMetric;
use serde::{Deserialize, Serialize};

const fn default_threshold() -> u8 {
    75
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Minimum similarity (0-100) for a fuzzy match to be accepted.
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    #[serde(default)]
    pub metric: SimilarityMetric,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            metric: SimilarityMetric::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = MatchingConfig::default();
        assert_eq!(config.threshold, 75);
        assert_eq!(config.metric, SimilarityMetric::Indel);
    }
}
