//! Role, entity kind, match decision, and sync action enums for Recon.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for cache keys, log fields, and CLI output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// LedgerRole
// ---------------------------------------------------------------------------

/// Semantic role of an ERP ledger, derived from its parent group.
///
/// Never set by hand: the classifier computes it from the closures of the
/// receivables and payables root groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerRole {
    Customer,
    Vendor,
    Other,
}

impl LedgerRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Other => "other",
        }
    }

    /// The target-system entity kind this role synchronizes to, if any.
    #[must_use]
    pub const fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Self::Customer => Some(EntityKind::Customer),
            Self::Vendor => Some(EntityKind::Vendor),
            Self::Other => None,
        }
    }
}

impl fmt::Display for LedgerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Type of a target-system directory entry.
///
/// Customers and vendors are cached and resolved in separate directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Vendor,
}

impl EntityKind {
    pub const ALL: [Self; 2] = [Self::Customer, Self::Vendor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "customers" => Ok(Self::Customer),
            "vendor" | "vendors" => Ok(Self::Vendor),
            other => Err(CoreError::Validation(format!(
                "unknown entity kind '{other}' (expected customer or vendor)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// MatchDecision
// ---------------------------------------------------------------------------

/// Outcome of resolving an ERP party name against a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDecision {
    /// Case-insensitive key hit (including keys pinned earlier in the run).
    Exact,
    /// Best similarity score reached the acceptance threshold.
    FuzzyAccepted,
    /// Several distinct entities tie for the best accepted score.
    Ambiguous,
    /// Nothing reached the acceptance threshold.
    NotFound,
}

impl MatchDecision {
    /// Whether the decision carries a usable matched entity.
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Exact | Self::FuzzyAccepted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::FuzzyAccepted => "fuzzy_accepted",
            Self::Ambiguous => "ambiguous",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for MatchDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SyncAction
// ---------------------------------------------------------------------------

/// Final action recorded for one record of a sync batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Created,
    Updated,
    Skipped,
    Failed,
}

impl SyncAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SimilarityMetric
// ---------------------------------------------------------------------------

/// String similarity used by the entity resolver, each scaled to 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// `2 * LCS / (|a| + |b|)`, the insertion/deletion edit ratio.
    #[default]
    Indel,
    /// Normalized Levenshtein distance (substitutions cost 1).
    Levenshtein,
    /// Jaro-Winkler similarity.
    JaroWinkler,
}

impl SimilarityMetric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indel => "indel",
            Self::Levenshtein => "levenshtein",
            Self::JaroWinkler => "jaro_winkler",
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_maps_to_entity_kind() {
        assert_eq!(LedgerRole::Customer.entity_kind(), Some(EntityKind::Customer));
        assert_eq!(LedgerRole::Vendor.entity_kind(), Some(EntityKind::Vendor));
        assert_eq!(LedgerRole::Other.entity_kind(), None);
    }

    #[test]
    fn entity_kind_parses_aliases() {
        assert_eq!("Customer".parse::<EntityKind>().unwrap(), EntityKind::Customer);
        assert_eq!(" vendors ".parse::<EntityKind>().unwrap(), EntityKind::Vendor);
        assert!("supplier".parse::<EntityKind>().is_err());
    }

    #[test]
    fn decision_is_match() {
        assert!(MatchDecision::Exact.is_match());
        assert!(MatchDecision::FuzzyAccepted.is_match());
        assert!(!MatchDecision::Ambiguous.is_match());
        assert!(!MatchDecision::NotFound.is_match());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&MatchDecision::FuzzyAccepted).unwrap();
        assert_eq!(json, "\"fuzzy_accepted\"");
        let role: LedgerRole = serde_json::from_str("\"vendor\"").unwrap();
        assert_eq!(role, LedgerRole::Vendor);
    }

    #[test]
    fn metric_defaults_to_indel() {
        assert_eq!(SimilarityMetric::default(), SimilarityMetric::Indel);
        let metric: SimilarityMetric = serde_json::from_str("\"jaro_winkler\"").unwrap();
        assert_eq!(metric, SimilarityMetric::JaroWinkler);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(SyncAction::Skipped.to_string(), "skipped");
        assert_eq!(EntityKind::Vendor.to_string(), "vendor");
    }
}
