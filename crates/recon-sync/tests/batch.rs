//! Batch orchestration against in-memory directories and a recording applier.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pretty_assertions::assert_eq;
use recon_core::entities::{LedgerAccount, LedgerRecord, TargetEntity};
use recon_core::enums::{EntityKind, LedgerRole, SyncAction};
use recon_match::Directory;
use recon_sync::{
    Applier, ContactPayload, DirectoryLoader, MissPolicy, SyncError, SyncOptions, SyncRecord, sync_batch,
};

#[derive(Default)]
struct StaticLoader {
    directories: HashMap<EntityKind, Vec<TargetEntity>>,
    failing: Vec<EntityKind>,
    loads: RefCell<Vec<EntityKind>>,
    created: Vec<TargetEntity>,
}

impl StaticLoader {
    fn with(kind: EntityKind, entities: Vec<TargetEntity>) -> Self {
        let mut loader = Self::default();
        loader.directories.insert(kind, entities);
        loader
    }
}

impl DirectoryLoader for StaticLoader {
    async fn load(&mut self, kind: EntityKind) -> Result<Directory, SyncError> {
        self.loads.borrow_mut().push(kind);
        if self.failing.contains(&kind) {
            return Err(SyncError::UnexpectedResponse("directory listing refused".into()));
        }
        Ok(Directory::from_entities(
            self.directories.get(&kind).cloned().unwrap_or_default(),
        ))
    }

    async fn record_created(&mut self, entity: &TargetEntity) -> Result<(), SyncError> {
        self.created.push(entity.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(String),
    Update(String, String),
}

#[derive(Default)]
struct RecordingApplier {
    calls: RefCell<Vec<Call>>,
    reject_updates: bool,
}

impl Applier for RecordingApplier {
    async fn create(&self, kind: EntityKind, payload: &ContactPayload) -> Result<TargetEntity, SyncError> {
        let mut calls = self.calls.borrow_mut();
        calls.push(Call::Create(payload.contact_name.clone()));
        Ok(TargetEntity::new(
            format!("new-{}", calls.len()),
            payload.contact_name.clone(),
            kind,
        ))
    }

    async fn update(&self, id: &str, payload: &ContactPayload) -> Result<(), SyncError> {
        self.calls
            .borrow_mut()
            .push(Call::Update(id.to_owned(), payload.contact_name.clone()));
        if self.reject_updates {
            return Err(SyncError::UnexpectedResponse("contact locked".into()));
        }
        Ok(())
    }
}

fn customer(record_id: &str, name: &str) -> SyncRecord {
    let ledger = LedgerRecord::new(name, "Sundry Debtors");
    SyncRecord::contact(
        record_id,
        EntityKind::Customer,
        ContactPayload::from_ledger(&ledger, EntityKind::Customer),
    )
}

fn customers() -> StaticLoader {
    StaticLoader::with(
        EntityKind::Customer,
        vec![
            TargetEntity::new("4600001", "Acme Traders", EntityKind::Customer),
            TargetEntity::new("4600002", "Sharma & Sons", EntityKind::Customer),
        ],
    )
}

fn actions(report: &recon_sync::SyncReport) -> Vec<SyncAction> {
    report.outcomes.iter().map(|o| o.action).collect()
}

#[tokio::test]
async fn one_malformed_record_does_not_stop_the_batch() {
    let records = vec![
        customer("r1", "Acme Traders"),
        customer("r2", "   "),
        customer("r3", "Sharma and Sons"),
    ];
    let mut loader = customers();
    let applier = RecordingApplier::default();

    let report = sync_batch(&records, &mut loader, &applier, &SyncOptions::default()).await;

    assert_eq!(report.outcomes.len(), records.len());
    assert_eq!(
        actions(&report),
        vec![SyncAction::Updated, SyncAction::Failed, SyncAction::Updated]
    );
    assert_eq!(report.outcomes[0].detail, "updated 4600001");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].record_id, "r2");
    assert_eq!(report.stats.updated, 2);
    assert_eq!(report.stats.failed, 1);
}

#[tokio::test]
async fn created_entity_is_updated_by_a_later_record() {
    let records = vec![customer("r1", "Gupta Wholesale"), customer("r2", "GUPTA WHOLESALE")];
    let mut loader = customers();
    let applier = RecordingApplier::default();
    let options = SyncOptions {
        miss_policy: MissPolicy::Create,
        ..SyncOptions::default()
    };

    let report = sync_batch(&records, &mut loader, &applier, &options).await;

    assert_eq!(actions(&report), vec![SyncAction::Created, SyncAction::Updated]);
    assert_eq!(report.outcomes[0].detail, "created new-1");
    assert_eq!(report.outcomes[1].detail, "updated new-1");
    assert_eq!(
        *applier.calls.borrow(),
        vec![
            Call::Create("Gupta Wholesale".into()),
            Call::Update("new-1".into(), "GUPTA WHOLESALE".into()),
        ]
    );
    assert_eq!(loader.created.len(), 1);
    assert_eq!(*loader.loads.borrow(), vec![EntityKind::Customer]);
}

#[tokio::test]
async fn not_found_fails_by_default_with_best_candidate() {
    let records = vec![customer("r1", "Acme Wholesale Corp")];
    let mut loader = customers();
    let applier = RecordingApplier::default();

    let report = sync_batch(&records, &mut loader, &applier, &SyncOptions::default()).await;

    assert_eq!(actions(&report), vec![SyncAction::Failed]);
    let failure = &report.errors[0];
    assert_eq!(failure.counterpart, "Acme Wholesale Corp");
    assert!(failure.reason.contains("not found"));
    assert_eq!(
        failure.best_candidate.as_ref().map(|c| c.display_name.as_str()),
        Some("Acme Traders")
    );
    assert!(applier.calls.borrow().is_empty());
}

#[tokio::test]
async fn ambiguous_match_fails_even_when_creating() {
    let records = vec![customer("r1", "Acme Traders")];
    let mut loader = StaticLoader::with(
        EntityKind::Customer,
        vec![
            TargetEntity::new("1", "Acme Traders A", EntityKind::Customer),
            TargetEntity::new("2", "Acme Traders B", EntityKind::Customer),
        ],
    );
    let applier = RecordingApplier::default();
    let options = SyncOptions {
        miss_policy: MissPolicy::Create,
        ..SyncOptions::default()
    };

    let report = sync_batch(&records, &mut loader, &applier, &options).await;

    assert_eq!(actions(&report), vec![SyncAction::Failed]);
    assert!(report.errors[0].reason.contains("several"));
    assert!(report.errors[0].best_candidate.is_some());
    assert!(applier.calls.borrow().is_empty());
}

#[tokio::test]
async fn cancellation_skips_the_rest() {
    let cancel = Arc::new(AtomicBool::new(true));
    let records = vec![customer("r1", "Acme Traders"), customer("r2", "Sharma & Sons")];
    let mut loader = customers();
    let applier = RecordingApplier::default();
    let options = SyncOptions {
        cancel: Some(Arc::clone(&cancel)),
        ..SyncOptions::default()
    };

    let report = sync_batch(&records, &mut loader, &applier, &options).await;

    assert!(cancel.load(Ordering::Relaxed));
    assert_eq!(actions(&report), vec![SyncAction::Skipped, SyncAction::Skipped]);
    assert!(report.outcomes.iter().all(|o| o.detail == "run cancelled"));
    assert!(loader.loads.borrow().is_empty());
}

#[tokio::test]
async fn dry_run_plans_without_applying() {
    let records = vec![
        customer("r1", "Acme Traders"),
        customer("r2", "Brand New Party"),
        customer("r3", "brand new party"),
    ];
    let mut loader = customers();
    let applier = RecordingApplier::default();
    let options = SyncOptions {
        miss_policy: MissPolicy::Create,
        dry_run: true,
        ..SyncOptions::default()
    };

    let report = sync_batch(&records, &mut loader, &applier, &options).await;

    let details: Vec<&str> = report.outcomes.iter().map(|o| o.detail.as_str()).collect();
    assert_eq!(
        details,
        vec![
            "dry run: would update 4600001",
            "dry run: would create",
            "dry run: would update planned:r2",
        ]
    );
    assert_eq!(report.stats.skipped, 3);
    assert!(applier.calls.borrow().is_empty());
    assert!(loader.created.is_empty());
}

#[tokio::test]
async fn directory_failure_fails_only_that_kind() {
    let vendor_ledger = LedgerRecord::new("Steel Supplier", "Sundry Creditors");
    let records = vec![
        customer("r1", "Acme Traders"),
        SyncRecord::contact(
            "r2",
            EntityKind::Vendor,
            ContactPayload::from_ledger(&vendor_ledger, EntityKind::Vendor),
        ),
        customer("r3", "Sharma & Sons"),
    ];
    let mut loader = customers();
    loader.failing.push(EntityKind::Customer);
    let applier = RecordingApplier::default();
    let options = SyncOptions {
        miss_policy: MissPolicy::Create,
        ..SyncOptions::default()
    };

    let report = sync_batch(&records, &mut loader, &applier, &options).await;

    assert_eq!(
        actions(&report),
        vec![SyncAction::Failed, SyncAction::Created, SyncAction::Failed]
    );
    assert!(report.errors[0].reason.contains("customer directory unavailable"));
    // the failed load is not retried for r3
    assert_eq!(
        *loader.loads.borrow(),
        vec![EntityKind::Customer, EntityKind::Vendor]
    );
}

#[tokio::test]
async fn apply_errors_become_failed_outcomes() {
    let records = vec![customer("r1", "Acme Traders")];
    let mut loader = customers();
    let applier = RecordingApplier {
        reject_updates: true,
        ..RecordingApplier::default()
    };

    let report = sync_batch(&records, &mut loader, &applier, &SyncOptions::default()).await;

    assert_eq!(actions(&report), vec![SyncAction::Failed]);
    assert!(report.errors[0].reason.contains("contact locked"));
}

#[tokio::test]
async fn other_ledgers_are_skipped_without_lookup() {
    let accounts = [
        LedgerAccount::classified(LedgerRecord::new("Cash", "Cash-in-Hand"), LedgerRole::Other),
        LedgerAccount::classified(LedgerRecord::new("Acme Traders", "Sundry Debtors"), LedgerRole::Customer),
    ];
    let records: Vec<SyncRecord> = accounts.iter().map(SyncRecord::from).collect();
    let mut loader = customers();
    let applier = RecordingApplier::default();

    let report = sync_batch(&records, &mut loader, &applier, &SyncOptions::default()).await;

    assert_eq!(actions(&report), vec![SyncAction::Skipped, SyncAction::Updated]);
    assert_eq!(report.outcomes[0].detail, "ledger role is other");
    assert_eq!(report.outcomes[0].record_id, "Cash");
}
