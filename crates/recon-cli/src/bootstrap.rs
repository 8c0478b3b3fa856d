use anyhow::Context;
use recon_config::ReconConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<ReconConfig> {
    ReconConfig::load_with_dotenv().context("failed to load recon configuration")
}
