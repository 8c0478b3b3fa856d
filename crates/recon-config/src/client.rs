//! Resilient API client tuning: timeouts, throttling, retry, token margin.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_min_interval_ms() -> u64 {
    200
}

const fn default_max_retries() -> u32 {
    5
}

const fn default_backoff_step_ms() -> u64 {
    1_000
}

const fn default_backoff_ceiling_ms() -> u64 {
    10_000
}

const fn default_token_margin_secs() -> u64 {
    60
}

const fn default_per_page() -> u32 {
    200
}

/// Payload `code` values the target system uses for throttling.
fn default_rate_limit_codes() -> Vec<i64> {
    vec![44, 45]
}

/// Payload `code` values the target system uses for an invalid or expired token.
fn default_auth_expired_codes() -> Vec<i64> {
    vec![57]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum spacing between two outbound calls.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Rate-limit retries before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff grows by this much per rate-limited attempt.
    #[serde(default = "default_backoff_step_ms")]
    pub backoff_step_ms: u64,

    /// Upper bound for a single backoff delay.
    #[serde(default = "default_backoff_ceiling_ms")]
    pub backoff_ceiling_ms: u64,

    /// Refresh the access token this long before its declared expiry.
    #[serde(default = "default_token_margin_secs")]
    pub token_margin_secs: u64,

    /// Page size for paginated listings.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_rate_limit_codes")]
    pub rate_limit_codes: Vec<i64>,

    #[serde(default = "default_auth_expired_codes")]
    pub auth_expired_codes: Vec<i64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            min_interval_ms: default_min_interval_ms(),
            max_retries: default_max_retries(),
            backoff_step_ms: default_backoff_step_ms(),
            backoff_ceiling_ms: default_backoff_ceiling_ms(),
            token_margin_secs: default_token_margin_secs(),
            per_page: default_per_page(),
            rate_limit_codes: default_rate_limit_codes(),
            auth_expired_codes: default_auth_expired_codes(),
        }
    }
}
