//! ERP source (XML over HTTP) configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    String::from("http://localhost:9000")
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErpConfig {
    /// Endpoint accepting `ENVELOPE` export requests.
    #[serde(default = "default_url")]
    pub url: String,

    /// Export requests over large companies are slow; keep this generous.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
