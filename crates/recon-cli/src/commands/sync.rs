use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use recon_sync::{BooksApplier, BooksDirectoryLoader, MissPolicy, SyncOptions, SyncRecord, ledger_records, sync_batch};

use crate::cli::{OutputFormat, SyncArgs};
use crate::commands::classify;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Sync classified ledgers; exits 1 if any record failed.
pub async fn handle(args: &SyncArgs, ctx: &AppContext) -> anyhow::Result<i32> {
    let client = ctx.books()?;
    let classification = classify::load(ctx, ctx.flags.refresh).await?;

    let records: Vec<SyncRecord> = ledger_records(&classification)
        .into_iter()
        .filter(|record| args.kind.is_none() || record.kind() == args.kind)
        .collect();
    tracing::info!(records = records.len(), dry_run = args.dry_run, "starting sync");

    let cancel = Arc::new(AtomicBool::new(false));
    let watcher = tokio::spawn({
        let cancel = Arc::clone(&cancel);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, finishing current record");
                cancel.store(true, Ordering::Relaxed);
            }
        }
    });

    let options = SyncOptions {
        match_config: ctx.match_config(),
        miss_policy: if args.create_missing {
            MissPolicy::Create
        } else {
            MissPolicy::Fail
        },
        dry_run: args.dry_run,
        cancel: Some(Arc::clone(&cancel)),
    };
    let mut loader = BooksDirectoryLoader::new(&client).with_cache(&ctx.cache, ctx.flags.refresh);
    let applier = BooksApplier::new(client.clone());

    let progress = Progress::spinner(
        ctx.flags.show_progress(),
        &format!("syncing {} records", records.len()),
    );
    let report = sync_batch(&records, &mut loader, &applier, &options).await;
    watcher.abort();
    progress.finish_ok(&format!(
        "{} created, {} updated, {} skipped, {} failed",
        report.stats.created, report.stats.updated, report.stats.skipped, report.stats.failed
    ));

    match ctx.flags.format {
        OutputFormat::Json => output(&report, OutputFormat::Json)?,
        OutputFormat::Table => {
            output(&report.outcomes, OutputFormat::Table)?;
            if !report.errors.is_empty() {
                println!();
                output(&report.errors, OutputFormat::Table)?;
            }
        }
    }
    Ok(i32::from(report.has_failures()))
}
