//! Response classification.
//!
//! The service signals throttling and token expiry either through the HTTP
//! status (429, 401) or through a numeric `code` in a JSON body, sometimes on
//! a `200`. Both paths collapse into one [`Signal`] here so the retry loop in
//! [`crate::ApiClient`] only has one thing to branch on.

use serde_json::Value;

use crate::transport::ApiResponse;

/// What the retry loop should do with a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Success(Value),
    RateLimited { retry_after: Option<u64> },
    AuthExpired { message: String },
    Rejected { code: i64, message: String },
    /// Success status whose body is not JSON.
    Undecodable(String),
}

/// Payload codes that carry a special meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalCodes {
    pub rate_limit: Vec<i64>,
    pub auth_expired: Vec<i64>,
}

impl SignalCodes {
    pub fn classify(&self, response: &ApiResponse) -> Signal {
        let parsed: Option<Value> = serde_json::from_str(&response.body).ok();
        let code = parsed
            .as_ref()
            .and_then(|body| body.get("code"))
            .and_then(Value::as_i64);
        let message = parsed
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .map_or_else(|| response.body.clone(), str::to_owned);

        if response.status == 429 || code.is_some_and(|c| self.rate_limit.contains(&c)) {
            return Signal::RateLimited {
                retry_after: response.retry_after,
            };
        }
        if response.status == 401 || code.is_some_and(|c| self.auth_expired.contains(&c)) {
            return Signal::AuthExpired { message };
        }

        let success = (200..300).contains(&response.status);
        match (code, parsed) {
            (Some(code), _) if code != 0 => Signal::Rejected { code, message },
            (_, Some(body)) if success => Signal::Success(body),
            (_, None) if success && response.body.trim().is_empty() => Signal::Success(Value::Null),
            (_, None) if success => Signal::Undecodable(truncate(&response.body)),
            _ => Signal::Rejected {
                code: i64::from(response.status),
                message,
            },
        }
    }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_owned(),
    }
}
