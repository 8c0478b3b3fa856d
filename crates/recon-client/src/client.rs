//! The resilient call loop and pagination.

use std::sync::Arc;
use std::time::Duration;

use recon_config::{BooksConfig, ClientConfig};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::retry::BackoffPolicy;
use crate::signal::{Signal, SignalCodes};
use crate::throttle::Throttle;
use crate::token::TokenManager;
use crate::transport::{ApiRequest, RefreshGrant, ReqwestTransport, Transport};

/// Everything an [`ApiClient`] needs besides its transport.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub organization_id: String,
    pub grant: RefreshGrant,
    pub timeout: Duration,
    pub min_interval: Duration,
    pub token_margin: Duration,
    pub backoff: BackoffPolicy,
    pub codes: SignalCodes,
    pub per_page: u32,
}

impl ClientSettings {
    #[must_use]
    pub fn from_config(books: &BooksConfig, client: &ClientConfig) -> Self {
        Self {
            base_url: books.base_url.trim_end_matches('/').to_owned(),
            organization_id: books.organization_id.clone(),
            grant: RefreshGrant {
                auth_url: books.auth_url.clone(),
                client_id: books.client_id.clone(),
                client_secret: books.client_secret.clone(),
                refresh_token: books.refresh_token.clone(),
            },
            timeout: Duration::from_secs(client.timeout_secs),
            min_interval: Duration::from_millis(client.min_interval_ms),
            token_margin: Duration::from_secs(client.token_margin_secs),
            backoff: BackoffPolicy {
                max_retries: client.max_retries,
                step: Duration::from_millis(client.backoff_step_ms),
                ceiling: Duration::from_millis(client.backoff_ceiling_ms),
            },
            codes: SignalCodes {
                rate_limit: client.rate_limit_codes.clone(),
                auth_expired: client.auth_expired_codes.clone(),
            },
            per_page: client.per_page.max(1),
        }
    }
}

/// Authenticated, throttled, retrying client for the Books REST API.
///
/// Clones share the token cache and the throttle, so spacing holds across
/// every handle to the same service.
#[derive(Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    organization_id: String,
    timeout: Duration,
    tokens: Arc<TokenManager>,
    throttle: Arc<Throttle>,
    backoff: BackoffPolicy,
    codes: SignalCodes,
    per_page: u32,
}

impl<T: Clone> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_url: self.base_url.clone(),
            organization_id: self.organization_id.clone(),
            timeout: self.timeout,
            tokens: Arc::clone(&self.tokens),
            throttle: Arc::clone(&self.throttle),
            backoff: self.backoff,
            codes: self.codes.clone(),
            per_page: self.per_page,
        }
    }
}

impl ApiClient<ReqwestTransport> {
    /// Build a production client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if credentials are missing or the HTTP
    /// client cannot be built.
    pub fn from_config(books: &BooksConfig, client: &ClientConfig) -> Result<Self, ClientError> {
        if !books.is_configured() {
            return Err(ClientError::Config(
                "books credentials are incomplete (client_id, client_secret, refresh_token, organization_id)".into(),
            ));
        }
        let settings = ClientSettings::from_config(books, client);
        let transport = ReqwestTransport::new(settings.timeout)?;
        Ok(Self::with_transport(transport, settings))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, settings: ClientSettings) -> Self {
        Self {
            transport,
            base_url: settings.base_url,
            organization_id: settings.organization_id,
            timeout: settings.timeout,
            tokens: Arc::new(TokenManager::new(settings.grant, settings.token_margin)),
            throttle: Arc::new(Throttle::new(settings.min_interval)),
            backoff: settings.backoff,
            codes: settings.codes,
            per_page: settings.per_page,
        }
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Perform one logical call, retrying through throttling and token expiry.
    ///
    /// `endpoint` is appended to the base URL and should start with `/`.
    /// The organization scope is added to `params` automatically.
    ///
    /// Rate-limited responses are retried with linear backoff up to the
    /// policy's `max_retries`. An expired token is refreshed and the call
    /// retried once; that retry does not count against the rate-limit budget.
    ///
    /// # Errors
    ///
    /// Returns the first terminal [`ClientError`].
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        params: &[(&str, &str)],
    ) -> Result<Value, ClientError> {
        let request = self.build_request(method, endpoint, payload, params);
        let mut rate_limited: u32 = 0;
        let mut auth_retried = false;

        loop {
            let token = self.tokens.access_token(&self.transport).await?;
            self.throttle.wait().await;
            debug!(method = %request.method, url = %request.url, "sending request");

            let response = tokio::time::timeout(self.timeout, self.transport.send(&request, &token))
                .await
                .map_err(|_| ClientError::Timeout(self.timeout))??;

            match self.codes.classify(&response) {
                Signal::Success(body) => return Ok(body),
                Signal::Rejected { code, message } => {
                    return Err(ClientError::Application { code, message });
                }
                Signal::Undecodable(snippet) => {
                    return Err(ClientError::Decode(format!(
                        "{} {} returned non-JSON body: {snippet}",
                        request.method, request.url
                    )));
                }
                Signal::AuthExpired { message } => {
                    if auth_retried {
                        return Err(ClientError::Auth(message));
                    }
                    warn!(url = %request.url, "access token rejected, refreshing");
                    self.tokens.invalidate().await;
                    auth_retried = true;
                }
                Signal::RateLimited { retry_after } => {
                    rate_limited += 1;
                    if rate_limited > self.backoff.max_retries {
                        return Err(ClientError::RateLimitExceeded {
                            attempts: rate_limited,
                        });
                    }
                    let delay = self
                        .backoff
                        .delay_for(rate_limited, retry_after.map(Duration::from_secs));
                    warn!(
                        url = %request.url,
                        attempt = rate_limited,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Fetch every page of a collection endpoint.
    ///
    /// Stops when a page reports `page_context.has_more_page = false` or
    /// comes back empty.
    ///
    /// # Errors
    ///
    /// Propagates the first failed page; partial results are discarded.
    pub async fn list_all(
        &self,
        endpoint: &str,
        collection_key: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Value>, ClientError> {
        let per_page = self.per_page.to_string();
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let page_str = page.to_string();
            let mut query = params.to_vec();
            query.push(("page", &page_str));
            query.push(("per_page", &per_page));

            let body = self.call(Method::GET, endpoint, None, &query).await?;
            let batch = match body.get(collection_key) {
                Some(Value::Array(batch)) => batch.clone(),
                Some(_) => {
                    return Err(ClientError::Decode(format!(
                        "'{collection_key}' in {endpoint} is not an array"
                    )));
                }
                None => Vec::new(),
            };
            if batch.is_empty() {
                break;
            }
            items.extend(batch);

            let has_more = body
                .pointer("/page_context/has_more_page")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if !has_more {
                break;
            }
            page += 1;
        }

        debug!(endpoint, count = items.len(), pages = page, "listed collection");
        Ok(items)
    }

    fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        params: &[(&str, &str)],
    ) -> ApiRequest {
        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        if !self.organization_id.is_empty() && !query.iter().any(|(k, _)| k == "organization_id") {
            query.push(("organization_id".into(), self.organization_id.clone()));
        }
        ApiRequest {
            method,
            url: format!("{}{endpoint}", self.base_url),
            query,
            body: payload.cloned(),
        }
    }
}
