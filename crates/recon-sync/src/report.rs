use recon_core::entities::{Candidate, SyncOutcome};
use recon_core::enums::SyncAction;
use serde::{Deserialize, Serialize};

/// Per-action counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncStats {
    pub const fn record(&mut self, action: SyncAction) {
        match action {
            SyncAction::Created => self.created += 1,
            SyncAction::Updated => self.updated += 1,
            SyncAction::Skipped => self.skipped += 1,
            SyncAction::Failed => self.failed += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }
}

/// A failed record, with enough context for an operator to fix it by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub record_id: String,
    /// Name that was resolved against the directory.
    pub counterpart: String,
    pub reason: String,
    pub best_candidate: Option<Candidate>,
}

/// Result of [`crate::sync_batch`]: one outcome per input record, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub outcomes: Vec<SyncOutcome>,
    pub errors: Vec<SyncFailure>,
}

impl SyncReport {
    pub(crate) fn push(&mut self, outcome: SyncOutcome) {
        self.stats.record(outcome.action);
        self.outcomes.push(outcome);
    }

    pub(crate) fn push_failure(&mut self, outcome: SyncOutcome, failure: SyncFailure) {
        self.push(outcome);
        self.errors.push(failure);
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.stats.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stats_count_each_action() {
        let mut report = SyncReport::default();
        report.push(SyncOutcome::new("a", SyncAction::Created, "created 1"));
        report.push(SyncOutcome::new("b", SyncAction::Skipped, "run cancelled"));
        report.push_failure(
            SyncOutcome::new("c", SyncAction::Failed, "boom"),
            SyncFailure {
                record_id: "c".into(),
                counterpart: "C".into(),
                reason: "boom".into(),
                best_candidate: None,
            },
        );

        assert_eq!(
            report.stats,
            SyncStats {
                created: 1,
                updated: 0,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(report.stats.total(), report.outcomes.len());
        assert_eq!(report.errors.len(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn report_serializes_with_snake_case_actions() {
        let mut report = SyncReport::default();
        report.push(SyncOutcome::new("a", SyncAction::Updated, "updated 9"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stats"]["updated"], 1);
        assert_eq!(json["outcomes"][0]["action"], "updated");
    }
}
