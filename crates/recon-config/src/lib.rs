//! # recon-config
//!
//! Layered configuration loading for Recon using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RECON_*` prefix, `__` as separator)
//! 2. Project-level `.recon/config.toml`
//! 3. User-level `~/.config/recon/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RECON_BOOKS__CLIENT_ID` -> `books.client_id`,
//! `RECON_MATCHING__THRESHOLD` -> `matching.threshold`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use recon_config::ReconConfig;
//!
//! let config = ReconConfig::load_with_dotenv().expect("config");
//!
//! if config.books.is_configured() {
//!     println!("Books org: {}", config.books.organization_id);
//! }
//! ```

mod books;
mod cache;
mod client;
mod erp;
mod error;
mod ledger;
mod matching;

pub use books::BooksConfig;
pub use cache::CacheConfig;
pub use client::ClientConfig;
pub use erp::ErpConfig;
pub use error::ConfigError;
pub use ledger::LedgerConfig;
pub use matching::MatchingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReconConfig {
    #[serde(default)]
    pub books: BooksConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub erp: ErpConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl ReconConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a provider fails to parse or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".recon/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("RECON_").split("__"))
    }

    /// Reject values no component can work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.threshold > 100 {
            return Err(ConfigError::InvalidValue {
                field: "matching.threshold".into(),
                reason: format!("{} is outside 0-100", self.matching.threshold),
            });
        }
        if self.client.per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.per_page".into(),
                reason: "page size must be at least 1".into(),
            });
        }
        if self.ledger.receivables_root.trim().is_empty()
            || self.ledger.payables_root.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "ledger".into(),
                reason: "receivables_root and payables_root must be set".into(),
            });
        }
        Ok(())
    }

    /// Fail early when a command needs the target system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BooksUnconfigured`] listing the empty credentials.
    pub fn require_books(&self) -> Result<&BooksConfig, ConfigError> {
        let missing = self.books.missing_fields();
        if missing.is_empty() {
            Ok(&self.books)
        } else {
            Err(ConfigError::BooksUnconfigured { missing })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("recon").join("config.toml"))
    }

    /// Load `.env` from the current directory, silently doing nothing if absent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = ReconConfig::default();
        assert!(!config.books.is_configured());
        assert_eq!(config.matching.threshold, 75);
        assert_eq!(config.ledger.receivables_root, "Sundry Debtors");
        assert_eq!(config.ledger.payables_root, "Sundry Creditors");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = ReconConfig::figment();
        let config: ReconConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.client.per_page, 200);
        assert_eq!(config.erp.url, "http://localhost:9000");
        assert_eq!(config.cache.path, ".recon/cache.db");
    }

    #[test]
    fn validate_rejects_threshold_above_100() {
        let mut config = ReconConfig::default();
        config.matching.threshold = 101;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "matching.threshold"));
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = ReconConfig::default();
        config.client.per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn require_books_reports_section() {
        let config = ReconConfig::default();
        let err = config.require_books().unwrap_err();
        assert!(err.to_string().contains("books"));
    }
}
