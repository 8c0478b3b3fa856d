use serde::{Deserialize, Serialize};

use super::TargetEntity;
use crate::enums::MatchDecision;

/// Closest directory entry seen while resolving, with its score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub display_name: String,
    pub score: u8,
}

/// Result of resolving one ERP party name against a directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub query_name: String,
    /// Set only for `exact` and `fuzzy_accepted` decisions.
    pub matched: Option<TargetEntity>,
    /// Similarity of the best entry, 0-100.
    pub confidence: u8,
    pub decision: MatchDecision,
    /// Best entry seen, kept for operator review on misses.
    pub best_candidate: Option<Candidate>,
}

impl MatchResult {
    /// Matched entity id, if the decision is a match.
    #[must_use]
    pub fn matched_id(&self) -> Option<&str> {
        self.matched.as_ref().map(|entity| entity.id.as_str())
    }

    /// Short operator-facing description of a miss.
    #[must_use]
    pub fn miss_reason(&self) -> String {
        match (&self.decision, &self.best_candidate) {
            (MatchDecision::Ambiguous, Some(best)) => format!(
                "'{}' matches several entries equally (best '{}', score {})",
                self.query_name, best.display_name, best.score
            ),
            (_, Some(best)) => format!(
                "'{}' not found (closest '{}', score {})",
                self.query_name, best.display_name, best.score
            ),
            (_, None) => format!("'{}' not found (directory empty)", self.query_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_reason_names_best_candidate() {
        let result = MatchResult {
            query_name: "Acme Trdrs".into(),
            matched: None,
            confidence: 61,
            decision: MatchDecision::NotFound,
            best_candidate: Some(Candidate {
                display_name: "Acme Traders Pvt Ltd".into(),
                score: 61,
            }),
        };
        let reason = result.miss_reason();
        assert!(reason.contains("Acme Traders Pvt Ltd"));
        assert!(reason.contains("61"));
        assert!(result.matched_id().is_none());
    }

    #[test]
    fn miss_reason_on_empty_directory() {
        let result = MatchResult {
            query_name: "Acme".into(),
            matched: None,
            confidence: 0,
            decision: MatchDecision::NotFound,
            best_candidate: None,
        };
        assert!(result.miss_reason().contains("directory empty"));
    }
}
