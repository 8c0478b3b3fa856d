use anyhow::Context;
use recon_cache::SnapshotStore;
use recon_client::ApiClient;
use recon_config::ReconConfig;
use recon_erp::ErpClient;
use recon_ledger::ClassifyRoots;
use recon_match::MatchConfig;

use crate::cli::GlobalFlags;

/// Everything a command handler needs, built once per invocation.
pub struct AppContext {
    pub config: ReconConfig,
    pub flags: GlobalFlags,
    pub cache: SnapshotStore,
}

impl AppContext {
    pub async fn init(config: ReconConfig, flags: GlobalFlags) -> anyhow::Result<Self> {
        let cache = SnapshotStore::from_config(&config.cache)
            .await
            .with_context(|| format!("failed to open cache at {}", config.cache.path))?;
        if !config.cache.is_persistent() {
            tracing::debug!("cache is in memory; snapshots end with this run");
        }
        Ok(Self { config, flags, cache })
    }

    pub fn erp(&self) -> anyhow::Result<ErpClient> {
        ErpClient::from_config(&self.config.erp).context("failed to build ERP client")
    }

    /// Books client; fails early with a config error when credentials are missing.
    pub fn books(&self) -> anyhow::Result<ApiClient> {
        let books = self.config.require_books()?;
        ApiClient::from_config(books, &self.config.client).context("failed to build Books client")
    }

    pub fn roots(&self) -> ClassifyRoots {
        ClassifyRoots::from(&self.config.ledger)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::from(&self.config.matching)
    }
}
