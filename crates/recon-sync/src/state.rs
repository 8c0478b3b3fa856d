//! Per-record state machine.
//!
//! ```text
//! pending → resolving → deciding → applying → done(created | updated | failed)
//!    │           │          └──→ done(skipped)        (dry run)
//!    │           └──→ done(failed)                    (no directory, ambiguous, not found)
//!    └──→ done(skipped | failed)                      (skip reason, no counterpart name)
//! ```

use std::fmt;

use recon_core::enums::SyncAction;
use recon_core::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordState {
    Pending,
    Resolving,
    Deciding,
    Applying,
    Done(SyncAction),
}

impl RecordState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[
                Self::Resolving,
                Self::Done(SyncAction::Skipped),
                Self::Done(SyncAction::Failed),
            ],
            Self::Resolving => &[Self::Deciding, Self::Done(SyncAction::Failed)],
            Self::Deciding => &[Self::Applying, Self::Done(SyncAction::Skipped)],
            Self::Applying => &[
                Self::Done(SyncAction::Created),
                Self::Done(SyncAction::Updated),
                Self::Done(SyncAction::Failed),
            ],
            Self::Done(_) => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `next` is not reachable.
    pub fn transition(self, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done(_))
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Resolving => f.write_str("resolving"),
            Self::Deciding => f.write_str("deciding"),
            Self::Applying => f.write_str("applying"),
            Self::Done(action) => write!(f, "done({action})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_allowed() {
        let state = RecordState::Pending
            .transition(RecordState::Resolving)
            .and_then(|s| s.transition(RecordState::Deciding))
            .and_then(|s| s.transition(RecordState::Applying))
            .and_then(|s| s.transition(RecordState::Done(SyncAction::Created)))
            .unwrap();
        assert!(state.is_done());
    }

    #[test]
    fn resolution_cannot_skip_to_created() {
        assert!(!RecordState::Resolving.can_transition_to(RecordState::Done(SyncAction::Created)));
        assert!(!RecordState::Pending.can_transition_to(RecordState::Applying));
    }

    #[test]
    fn done_is_terminal() {
        let err = RecordState::Done(SyncAction::Updated)
            .transition(RecordState::Pending)
            .unwrap_err();
        assert!(err.to_string().contains("done(updated)"));
    }

    #[test]
    fn dry_run_skip_only_from_deciding_or_pending() {
        assert!(RecordState::Deciding.can_transition_to(RecordState::Done(SyncAction::Skipped)));
        assert!(RecordState::Pending.can_transition_to(RecordState::Done(SyncAction::Skipped)));
        assert!(!RecordState::Applying.can_transition_to(RecordState::Done(SyncAction::Skipped)));
    }
}
