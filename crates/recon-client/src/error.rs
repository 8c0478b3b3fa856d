//! Client error types.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`crate::ApiClient`].
///
/// Every variant is terminal for the call that produced it: rate limits and
/// expired tokens have already been retried by the time one surfaces.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Token exchange failed, or the token was rejected again right after a refresh.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Throttling persisted past the retry budget.
    #[error("rate limited, gave up after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    /// No response within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure (DNS, TLS, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// Well-formed rejection from the service, passed through unchanged.
    #[error("API error ({code}): {message}")]
    Application { code: i64, message: String },

    /// Success status with a body that is not the expected JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// The client could not be built from the supplied settings.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the failure happened before the service answered.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }
}

impl ClientError {
    /// Map a reqwest failure, reporting `timeout` as the elapsed budget.
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
