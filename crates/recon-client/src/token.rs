//! Cached access token with early refresh.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::ClientError;
use crate::transport::{RefreshGrant, Transport};

#[derive(Debug)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Hands out a bearer token, exchanging the refresh token only when the
/// cached one is within `margin` of its declared expiry or was invalidated.
///
/// The lock is held across the exchange so concurrent callers wait for one
/// refresh instead of racing several.
#[derive(Debug)]
pub struct TokenManager {
    grant: RefreshGrant,
    margin: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub const fn new(grant: RefreshGrant, margin: Duration) -> Self {
        Self {
            grant,
            margin,
            cached: Mutex::const_new(None),
        }
    }

    /// Current token, refreshing first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] (or a transport error) if the exchange fails.
    pub async fn access_token<T: Transport>(&self, transport: &T) -> Result<String, ClientError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && Instant::now() < token.refresh_at
        {
            return Ok(token.value.clone());
        }

        debug!("exchanging refresh token");
        let grant = transport.exchange_refresh_token(&self.grant).await?;
        let lifetime = Duration::from_secs(grant.expires_in).saturating_sub(self.margin);
        let value = grant.access_token;
        *cached = Some(CachedToken {
            value: value.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(value)
    }

    /// Drop the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
