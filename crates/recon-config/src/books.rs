//! Target accounting service (Books REST API) configuration.

use serde::{Deserialize, Serialize};

/// Default API base URL (India data center).
fn default_base_url() -> String {
    String::from("https://www.zohoapis.in/books/v3")
}

/// Default OAuth2 token endpoint (India data center).
fn default_auth_url() -> String {
    String::from("https://accounts.zoho.in/oauth/v2/token")
}

#[derive(Clone, Deserialize, Serialize)]
pub struct BooksConfig {
    /// REST API base URL, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth2 token endpoint used for the refresh-token exchange.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// OAuth2 client ID.
    #[serde(default)]
    pub client_id: String,

    /// OAuth2 client secret.
    #[serde(default)]
    pub client_secret: String,

    /// Long-lived refresh token minted from a self-client grant code.
    #[serde(default)]
    pub refresh_token: String,

    /// Organization every request is scoped to.
    #[serde(default)]
    pub organization_id: String,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_url: default_auth_url(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            organization_id: String::new(),
        }
    }
}

impl std::fmt::Debug for BooksConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BooksConfig")
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("organization_id", &self.organization_id)
            .finish()
    }
}

impl BooksConfig {
    /// Check if the credentials needed for a refresh-token exchange are present.
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Credential fields that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("organization_id", &self.organization_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = BooksConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.base_url, "https://www.zohoapis.in/books/v3");
        assert!(config.auth_url.ends_with("/oauth/v2/token"));
    }

    #[test]
    fn configured_when_all_credentials_set() {
        let config = BooksConfig {
            client_id: "1000.ABC".into(),
            client_secret: "secret".into(),
            refresh_token: "1000.refresh".into(),
            organization_id: "60012345".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(config.missing_fields().is_empty());
    }

    #[test]
    fn missing_fields_names_each_empty_credential() {
        let config = BooksConfig {
            organization_id: "60012345".into(),
            client_id: "1000.ABC".into(),
            ..Default::default()
        };
        assert_eq!(config.missing_fields(), vec!["client_secret", "refresh_token"]);
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = BooksConfig {
            client_secret: "super-secret".into(),
            refresh_token: "1000.refresh".into(),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("1000.refresh"));
        assert!(printed.contains("[REDACTED]"));
    }
}
