use anyhow::Context;
use chrono::{DateTime, Utc};
use recon_cache::{CLASSIFICATION_KEY, Namespace};
use recon_core::errors::MasterDataIssue;
use recon_ledger::{Classification, ClassificationStats, classify_ledgers};
use serde::Serialize;

use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct ClassifySummary {
    #[serde(flatten)]
    stats: ClassificationStats,
    refreshed_at: Option<DateTime<Utc>>,
    issues: Vec<String>,
}

/// Always re-fetches from the ERP and replaces the cached snapshot.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<i32> {
    let classification = load(ctx, true).await?;
    let refreshed_at = ctx.cache.refreshed_at(Namespace::Erp, CLASSIFICATION_KEY).await?;

    let summary = ClassifySummary {
        stats: classification.stats.clone(),
        refreshed_at,
        issues: classification.issues.iter().map(MasterDataIssue::to_string).collect(),
    };
    output(&summary, ctx.flags.format)?;
    Ok(0)
}

/// Cached classification, fetched and classified on a miss or when forced.
pub async fn load(ctx: &AppContext, force_refresh: bool) -> anyhow::Result<Classification> {
    let progress = Progress::spinner(ctx.flags.show_progress(), "fetching groups from ERP");
    let roots = ctx.roots();

    let result = ctx
        .cache
        .get(Namespace::Erp, CLASSIFICATION_KEY, force_refresh, || async {
            let erp = ctx.erp()?;
            let groups = erp.fetch_group_edges().await.context("failed to export groups")?;
            progress.set_message("fetching ledgers from ERP");
            let ledgers = erp.fetch_ledgers().await.context("failed to export ledgers")?;
            Ok::<_, anyhow::Error>(classify_ledgers(&groups, &ledgers, &roots))
        })
        .await;

    progress.finish_clear();
    result
}
