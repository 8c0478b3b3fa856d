//! Sequential batch orchestrator.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use recon_core::entities::{MatchResult, SyncOutcome, TargetEntity};
use recon_core::enums::{EntityKind, MatchDecision, SyncAction};
use recon_match::{Directory, MatchConfig, resolve};
use tracing::{debug, error, info, trace, warn};

use crate::books::{Applier, DirectoryLoader};
use crate::contacts::{ContactPayload, RecordPlan, SyncRecord};
use crate::report::{SyncFailure, SyncReport};
use crate::state::RecordState;

/// What to do with a record whose counterpart is not in the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissPolicy {
    /// Report the record failed, with the closest candidate.
    #[default]
    Fail,
    /// Create the counterpart.
    Create,
}

/// Knobs for one [`sync_batch`] run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub match_config: MatchConfig,
    pub miss_policy: MissPolicy,
    /// Resolve and decide, but apply nothing.
    pub dry_run: bool,
    /// Checked between records; once set, the rest of the batch is skipped.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SyncOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Reconcile `records` against the target system, one at a time.
///
/// Each kind's directory is loaded on first use and reused for the rest of
/// the batch, so creates and fuzzy pins made early in the run are visible to
/// later records. Nothing a single record does aborts the batch: every
/// input yields exactly one outcome, in input order.
pub async fn sync_batch<L, A>(
    records: &[SyncRecord],
    loader: &mut L,
    applier: &A,
    options: &SyncOptions,
) -> SyncReport
where
    L: DirectoryLoader,
    A: Applier,
{
    let mut run = Run {
        loader,
        applier,
        options,
        directories: HashMap::new(),
        report: SyncReport::default(),
    };

    for (index, record) in records.iter().enumerate() {
        if options.is_cancelled() {
            warn!(remaining = records.len() - index, "run cancelled");
            for rest in &records[index..] {
                run.report
                    .push(SyncOutcome::new(&rest.record_id, SyncAction::Skipped, "run cancelled"));
            }
            break;
        }
        run.process(record).await;
    }

    let stats = run.report.stats;
    info!(
        created = stats.created,
        updated = stats.updated,
        skipped = stats.skipped,
        failed = stats.failed,
        dry_run = options.dry_run,
        "sync run finished"
    );
    run.report
}

struct Run<'a, L, A> {
    loader: &'a mut L,
    applier: &'a A,
    options: &'a SyncOptions,
    // a failed load is kept so the rest of that kind fails without retrying
    directories: HashMap<EntityKind, Result<Directory, String>>,
    report: SyncReport,
}

impl<L: DirectoryLoader, A: Applier> Run<'_, L, A> {
    async fn process(&mut self, record: &SyncRecord) {
        let options = self.options;
        let mut state = RecordState::Pending;

        let (kind, payload) = match &record.plan {
            RecordPlan::Skip { reason } => {
                advance(&mut state, RecordState::Done(SyncAction::Skipped), record);
                self.report
                    .push(SyncOutcome::new(&record.record_id, SyncAction::Skipped, reason));
                return;
            }
            RecordPlan::Sync { kind, payload } => (*kind, payload),
        };

        if record.name.trim().is_empty() {
            advance(&mut state, RecordState::Done(SyncAction::Failed), record);
            self.fail(record, "record has no counterpart name", None);
            return;
        }

        advance(&mut state, RecordState::Resolving, record);
        let directory = match self.directory(kind).await {
            Ok(directory) => directory,
            Err(reason) => {
                advance(&mut state, RecordState::Done(SyncAction::Failed), record);
                let reason = format!("{kind} directory unavailable: {reason}");
                self.fail(record, &reason, None);
                return;
            }
        };
        let result = resolve(&record.name, directory, &options.match_config);
        debug!(
            record_id = %record.record_id,
            decision = %result.decision,
            score = result.confidence,
            "resolved"
        );

        let proceed = match result.decision {
            MatchDecision::Exact | MatchDecision::FuzzyAccepted => true,
            MatchDecision::NotFound => options.miss_policy == MissPolicy::Create,
            MatchDecision::Ambiguous => false,
        };
        if !proceed {
            advance(&mut state, RecordState::Done(SyncAction::Failed), record);
            self.fail(record, &result.miss_reason(), Some(&result));
            return;
        }
        advance(&mut state, RecordState::Deciding, record);

        let target = result.matched.clone();
        if options.dry_run {
            advance(&mut state, RecordState::Done(SyncAction::Skipped), record);
            let detail = match &target {
                Some(entity) => format!("dry run: would update {}", entity.id),
                None => {
                    // later records with this name should plan an update, not a second create
                    let planned = TargetEntity::new(format!("planned:{}", record.record_id), record.name.trim(), kind);
                    self.insert_created(kind, &record.name, planned);
                    "dry run: would create".to_owned()
                }
            };
            self.report
                .push(SyncOutcome::new(&record.record_id, SyncAction::Skipped, detail));
            return;
        }

        advance(&mut state, RecordState::Applying, record);
        match target {
            Some(entity) => self.update(record, &mut state, &entity, payload).await,
            None => self.create(record, &mut state, kind, payload).await,
        }
    }

    async fn update(
        &mut self,
        record: &SyncRecord,
        state: &mut RecordState,
        entity: &TargetEntity,
        payload: &ContactPayload,
    ) {
        match self.applier.update(&entity.id, payload).await {
            Ok(()) => {
                advance(state, RecordState::Done(SyncAction::Updated), record);
                self.report.push(SyncOutcome::new(
                    &record.record_id,
                    SyncAction::Updated,
                    format!("updated {}", entity.id),
                ));
            }
            Err(err) => {
                advance(state, RecordState::Done(SyncAction::Failed), record);
                self.fail(record, &format!("update of {} failed: {err}", entity.id), None);
            }
        }
    }

    async fn create(
        &mut self,
        record: &SyncRecord,
        state: &mut RecordState,
        kind: EntityKind,
        payload: &ContactPayload,
    ) {
        match self.applier.create(kind, payload).await {
            Ok(entity) => {
                advance(state, RecordState::Done(SyncAction::Created), record);
                if let Err(err) = self.loader.record_created(&entity).await {
                    warn!(record_id = %record.record_id, error = %err, "created entity not cached");
                }
                let detail = format!("created {}", entity.id);
                self.insert_created(kind, &record.name, entity);
                self.report
                    .push(SyncOutcome::new(&record.record_id, SyncAction::Created, detail));
            }
            Err(err) => {
                advance(state, RecordState::Done(SyncAction::Failed), record);
                self.fail(record, &format!("create failed: {err}"), None);
            }
        }
    }

    async fn directory(&mut self, kind: EntityKind) -> Result<&mut Directory, String> {
        let slot = match self.directories.entry(kind) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let loaded = self.loader.load(kind).await.map_err(|err| {
                    warn!(%kind, error = %err, "directory load failed, failing its records");
                    err.to_string()
                });
                slot.insert(loaded)
            }
        };
        slot.as_mut().map_err(|reason| reason.clone())
    }

    fn insert_created(&mut self, kind: EntityKind, name: &str, entity: TargetEntity) {
        if let Some(Ok(directory)) = self.directories.get_mut(&kind) {
            directory.insert(entity.clone());
            directory.pin(name, entity);
        }
    }

    fn fail(&mut self, record: &SyncRecord, reason: &str, result: Option<&MatchResult>) {
        warn!(record_id = %record.record_id, reason, "record failed");
        self.report.push_failure(
            SyncOutcome::new(&record.record_id, SyncAction::Failed, reason),
            SyncFailure {
                record_id: record.record_id.clone(),
                counterpart: record.name.clone(),
                reason: reason.to_owned(),
                best_candidate: result.and_then(|r| r.best_candidate.clone()),
            },
        );
    }
}

fn advance(state: &mut RecordState, next: RecordState, record: &SyncRecord) {
    match state.transition(next) {
        Ok(next) => {
            trace!(record_id = %record.record_id, from = %state, to = %next, "record state");
            *state = next;
        }
        Err(err) => error!(record_id = %record.record_id, error = %err, "record state out of order"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SyncRecord {
        SyncRecord {
            record_id: "Acme Traders".into(),
            name: "Acme Traders".into(),
            plan: RecordPlan::Skip {
                reason: "test".into(),
            },
        }
    }

    #[test]
    fn advance_follows_the_state_machine() {
        let record = record();
        let mut state = RecordState::Pending;
        advance(&mut state, RecordState::Resolving, &record);
        advance(&mut state, RecordState::Deciding, &record);
        assert_eq!(state, RecordState::Deciding);
    }

    #[test]
    fn advance_refuses_out_of_order_moves() {
        let record = record();
        let mut state = RecordState::Resolving;
        advance(&mut state, RecordState::Done(SyncAction::Created), &record);
        assert_eq!(state, RecordState::Resolving);

        let mut done = RecordState::Done(SyncAction::Updated);
        advance(&mut done, RecordState::Pending, &record);
        assert!(done.is_done());
    }
}
