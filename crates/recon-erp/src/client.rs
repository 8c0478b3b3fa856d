use std::time::Duration;

use recon_config::ErpConfig;
use recon_core::entities::{GroupEdge, LedgerRecord};
use tracing::{debug, info};

use crate::error::ErpError;
use crate::parse::{parse_groups, parse_ledgers};
use crate::request::{AccountType, export_envelope};

/// HTTP client for the ERP's XML export port.
#[derive(Debug, Clone)]
pub struct ErpClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl ErpClient {
    /// # Errors
    ///
    /// Returns [`ErpError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ErpError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
            timeout,
        })
    }

    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &ErpConfig) -> Result<Self, ErpError> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// Export every group as a `(name, parent)` edge.
    ///
    /// # Errors
    ///
    /// Returns [`ErpError`] on timeout, HTTP failure, or a malformed export.
    pub async fn fetch_group_edges(&self) -> Result<Vec<GroupEdge>, ErpError> {
        let xml = self.export(AccountType::Groups).await?;
        let groups = parse_groups(&xml)?;
        info!(count = groups.len(), "fetched ERP groups");
        Ok(groups)
    }

    /// Export every ledger with its attributes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_group_edges`].
    pub async fn fetch_ledgers(&self) -> Result<Vec<LedgerRecord>, ErpError> {
        let xml = self.export(AccountType::Ledgers).await?;
        let ledgers = parse_ledgers(&xml)?;
        info!(count = ledgers.len(), "fetched ERP ledgers");
        Ok(ledgers)
    }

    async fn export(&self, account_type: AccountType) -> Result<String, ErpError> {
        debug!(url = %self.url, account_type = account_type.as_str(), "requesting export");
        let resp = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(export_envelope(account_type))
            .send()
            .await
            .map_err(|e| self.map_err(e))?;
        if !resp.status().is_success() {
            return Err(ErpError::Status {
                status: resp.status().as_u16(),
            });
        }
        resp.text().await.map_err(|e| self.map_err(e))
    }

    fn map_err(&self, err: reqwest::Error) -> ErpError {
        if err.is_timeout() {
            ErpError::Timeout(self.timeout)
        } else {
            ErpError::Http(err)
        }
    }
}
