use recon_core::entities::LedgerAccount;
use recon_ledger::search_ledgers;
use serde::Serialize;

use crate::cli::SearchArgs;
use crate::commands::classify;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LedgerRow<'a> {
    name: &'a str,
    parent: &'a str,
    role: &'a str,
    gstin: &'a str,
    state: &'a str,
}

impl<'a> From<&'a LedgerAccount> for LedgerRow<'a> {
    fn from(ledger: &'a LedgerAccount) -> Self {
        Self {
            name: ledger.name(),
            parent: ledger.parent(),
            role: ledger.role().as_str(),
            gstin: &ledger.record.gstin,
            state: &ledger.record.state,
        }
    }
}

pub async fn handle(args: &SearchArgs, ctx: &AppContext) -> anyhow::Result<i32> {
    let classification = classify::load(ctx, ctx.flags.refresh).await?;
    let rows: Vec<LedgerRow<'_>> = search_ledgers(&args.query, &classification.ledgers)
        .into_iter()
        .map(LedgerRow::from)
        .collect();
    tracing::debug!(query = %args.query, hits = rows.len(), "ledger search");
    output(&rows, ctx.flags.format)?;
    Ok(0)
}
