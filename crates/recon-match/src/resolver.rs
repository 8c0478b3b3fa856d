//! Exact-then-fuzzy resolution of a party name against a [`Directory`].

use recon_config::MatchingConfig;
use recon_core::entities::{Candidate, MatchResult, TargetEntity};
use recon_core::enums::{MatchDecision, SimilarityMetric};
use recon_core::normalize_name;
use tracing::debug;

use crate::directory::Directory;
use crate::similarity::{indel_upper_bound, similarity};

/// Acceptance threshold and metric for fuzzy matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Minimum score (0-100) for a fuzzy match to be accepted.
    pub threshold: u8,
    pub metric: SimilarityMetric,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 75,
            metric: SimilarityMetric::Indel,
        }
    }
}

impl From<&MatchingConfig> for MatchConfig {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            threshold: config.threshold,
            metric: config.metric,
        }
    }
}

/// Resolve `query_name` against `directory`.
///
/// 1. Case-folded exact hit (canonical or pinned): `exact`, confidence 100.
/// 2. Otherwise every canonical entry is scored and the best kept.
/// 3. Best score at or above the threshold: `fuzzy_accepted`, and the query
///    spelling is pinned to the match so the next lookup is exact.
/// 4. Several distinct entities tied at that best score, or a winning name
///    that several entities share: `ambiguous`, no pin.
/// 5. Anything else: `not_found`, with the closest entry for review.
///
/// Never creates anything; a miss is left for the caller to act on.
pub fn resolve(query_name: &str, directory: &mut Directory, config: &MatchConfig) -> MatchResult {
    let key = normalize_name(query_name);

    if !key.is_empty() && directory.is_conflicting(&key) {
        return MatchResult {
            query_name: query_name.to_owned(),
            matched: None,
            confidence: 100,
            decision: MatchDecision::Ambiguous,
            best_candidate: Some(Candidate {
                display_name: query_name.trim().to_owned(),
                score: 100,
            }),
        };
    }

    if let Some(entity) = directory.get(&key) {
        return MatchResult {
            query_name: query_name.to_owned(),
            matched: Some(entity.clone()),
            confidence: 100,
            decision: MatchDecision::Exact,
            best_candidate: Some(Candidate {
                display_name: entity.display_name.clone(),
                score: 100,
            }),
        };
    }

    let Best { score: best_score, tied, contested } = best_matches(&key, directory, config.metric);
    let best_candidate = tied.first().map(|entity| Candidate {
        display_name: entity.display_name.clone(),
        score: best_score,
    });

    let decision = match tied.len() {
        0 => MatchDecision::NotFound,
        _ if best_score < config.threshold => MatchDecision::NotFound,
        1 if !contested => MatchDecision::FuzzyAccepted,
        _ => MatchDecision::Ambiguous,
    };

    let matched = if decision == MatchDecision::FuzzyAccepted {
        let entity = tied[0].clone();
        directory.pin(&key, entity.clone());
        Some(entity)
    } else {
        None
    };

    debug!(
        query = query_name,
        decision = %decision,
        score = best_score,
        candidates = tied.len(),
        "resolved name"
    );

    MatchResult {
        query_name: query_name.to_owned(),
        matched,
        confidence: best_score,
        decision,
        best_candidate,
    }
}

/// [`resolve`] with the default threshold and metric.
pub fn resolve_entity(query_name: &str, directory: &mut Directory) -> MatchResult {
    resolve(query_name, directory, &MatchConfig::default())
}

struct Best {
    score: u8,
    /// Distinct entities reaching `score`.
    tied: Vec<TargetEntity>,
    /// A name reaching `score` belongs to more than one entity.
    contested: bool,
}

/// Best score over canonical entries, and every distinct entity reaching it.
fn best_matches(key: &str, directory: &Directory, metric: SimilarityMetric) -> Best {
    let key_len = key.chars().count();
    let mut best_score: u8 = 0;
    let mut tied: Vec<&TargetEntity> = Vec::new();
    let mut contested = false;

    for (name, entity) in directory.entries() {
        if metric == SimilarityMetric::Indel
            && !tied.is_empty()
            && indel_upper_bound(key_len, name.chars().count()) < best_score
        {
            continue;
        }
        let score = similarity(metric, key, name);
        if score == 0 {
            continue;
        }
        if score > best_score {
            best_score = score;
            tied.clear();
            tied.push(entity);
            // the directory keeps one entity per name; the others are only known as a conflict
            contested = directory.is_conflicting(name);
        } else if score == best_score {
            if !tied.iter().any(|t| t.id == entity.id) {
                tied.push(entity);
            }
            contested |= directory.is_conflicting(name);
        }
    }

    Best {
        score: best_score,
        tied: tied.into_iter().cloned().collect(),
        contested,
    }
}
