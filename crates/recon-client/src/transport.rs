//! The wire seam: one HTTP exchange, no retry or throttling.
//!
//! [`ApiClient`](crate::ApiClient) drives a [`Transport`]; production uses
//! [`ReqwestTransport`], tests script responses through their own
//! implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use serde::Deserialize;

use crate::error::ClientError;

/// A fully-resolved outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Raw response as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Retry-After` header in seconds, when present and numeric.
    pub retry_after: Option<u64>,
    pub body: String,
}

impl ApiResponse {
    /// Convenience for scripted transports.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn with_retry_after(mut self, secs: u64) -> Self {
        self.retry_after = Some(secs);
        self
    }
}

/// Credentials for the OAuth2 refresh-token exchange.
#[derive(Clone)]
pub struct RefreshGrant {
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshGrant")
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Access token minted by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Declared lifetime in seconds.
    pub expires_in: u64,
}

/// One HTTP exchange against the service and its token endpoint.
pub trait Transport: Send + Sync {
    /// Send `request` with `token` as the bearer credential.
    fn send(
        &self,
        request: &ApiRequest,
        token: &str,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// Trade the refresh token for a fresh access token.
    fn exchange_refresh_token(
        &self,
        grant: &RefreshGrant,
    ) -> impl Future<Output = Result<TokenGrant, ClientError>> + Send;
}

/// Token endpoint reply. The endpoint answers `200` with an `error` field on
/// bad credentials, so both shapes deserialize here.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3_600;

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("recon/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { http, timeout })
    }

    fn map_err(&self, err: &reqwest::Error) -> ClientError {
        ClientError::from_reqwest(err, self.timeout)
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest, token: &str) -> Result<ApiResponse, ClientError> {
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .header(AUTHORIZATION, format!("Zoho-oauthtoken {token}"))
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(|e| self.map_err(&e))?;
        into_api_response(resp).await.map_err(|e| self.map_err(&e))
    }

    async fn exchange_refresh_token(&self, grant: &RefreshGrant) -> Result<TokenGrant, ClientError> {
        let form = [
            ("refresh_token", grant.refresh_token.as_str()),
            ("client_id", grant.client_id.as_str()),
            ("client_secret", grant.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let resp = self
            .http
            .post(&grant.auth_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.map_err(&e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| self.map_err(&e))?;
        parse_token_response(status, &body)
    }
}

/// Read status, `Retry-After`, and body text off a reqwest response.
async fn into_api_response(resp: reqwest::Response) -> Result<ApiResponse, reqwest::Error> {
    let status = resp.status().as_u16();
    let retry_after = parse_retry_after(&resp);
    let body = resp.text().await?;
    Ok(ApiResponse {
        status,
        retry_after,
        body,
    })
}

fn parse_retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn parse_token_response(status: u16, body: &str) -> Result<TokenGrant, ClientError> {
    let parsed: TokenResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Auth(format!("token endpoint returned {status}: {e}")))?;
    match parsed.access_token {
        Some(access_token) if !access_token.is_empty() => Ok(TokenGrant {
            access_token,
            expires_in: parsed.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        }),
        _ => Err(ClientError::Auth(format!(
            "token endpoint returned {status}: {}",
            parsed.error.unwrap_or_else(|| "no access_token in response".into())
        ))),
    }
}
