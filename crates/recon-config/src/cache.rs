//! Reconciliation cache location.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from(".recon/cache.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// libSQL database file holding snapshots. `:memory:` disables persistence.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl CacheConfig {
    /// Whether snapshots survive the process.
    pub fn is_persistent(&self) -> bool {
        self.path != ":memory:"
    }
}
