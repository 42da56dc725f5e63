//! # Provider Configuration
//!
//! Connection settings for each insurance provider.
//!
//! A provider is enabled by the presence of its credentials: when they are
//! missing, the registry wires an adapter that fails locally with
//! "config missing".
//!
//! # Examples
//!
//! ```
//! use partner_hub::infrastructure::providers::config::EuroasiaConfig;
//!
//! let config = EuroasiaConfig::new("https://api.euroasia.example")
//!     .with_credentials("partner", "secret");
//! assert!(config.credentials().is_some());
//! ```

use crate::domain::value_objects::ProviderId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request HTTP timeout in milliseconds.
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Default reference data TTL in seconds.
const DEFAULT_REFERENCE_TTL_SECS: u64 = 300;

fn default_http_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_reference_ttl_secs() -> u64 {
    DEFAULT_REFERENCE_TTL_SECS
}

fn default_order() -> Vec<ProviderId> {
    ProviderId::ALL.to_vec()
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Euroasia settings: login credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuroasiaConfig {
    /// API base URL.
    #[serde(default)]
    pub base_url: String,
    /// Login user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Login password.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl EuroasiaConfig {
    /// Creates a configuration without credentials.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
        }
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Returns `(username, password)` when both are present and non-blank.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((
            non_blank(self.username.as_ref())?,
            non_blank(self.password.as_ref())?,
        ))
    }
}

/// NEO settings: static API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeoConfig {
    /// API base URL.
    #[serde(default)]
    pub base_url: String,
    /// API key sent as `X-Api-Key`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Vehicle group list lifetime in seconds; 0 disables caching.
    #[serde(default = "default_reference_ttl_secs")]
    pub reference_ttl_secs: u64,
}

impl NeoConfig {
    /// Creates a configuration without an API key.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            reference_ttl_secs: DEFAULT_REFERENCE_TTL_SECS,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the vehicle group list lifetime.
    #[must_use]
    pub fn with_reference_ttl_secs(mut self, secs: u64) -> Self {
        self.reference_ttl_secs = secs;
        self
    }

    /// Returns the API key when present and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_ref())
    }

    /// Returns the vehicle group list lifetime.
    #[must_use]
    pub fn reference_ttl(&self) -> Duration {
        Duration::from_secs(self.reference_ttl_secs)
    }
}

impl Default for NeoConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Gross settings. The pricing integration is not wired up yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossConfig {
    /// API base URL.
    #[serde(default)]
    pub base_url: String,
    /// API key.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl GrossConfig {
    /// Returns the API key when present and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_ref())
    }
}

/// Settings for every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Order of providers in aggregated results.
    #[serde(default = "default_order")]
    pub order: Vec<ProviderId>,
    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
    /// Euroasia settings.
    #[serde(default)]
    pub euroasia: EuroasiaConfig,
    /// NEO settings.
    #[serde(default)]
    pub neo: NeoConfig,
    /// Gross settings.
    #[serde(default)]
    pub gross: GrossConfig,
}

impl ProvidersConfig {
    /// Returns the configured order without duplicates.
    #[must_use]
    pub fn effective_order(&self) -> Vec<ProviderId> {
        let mut seen = Vec::with_capacity(self.order.len());
        for provider in &self.order {
            if !seen.contains(provider) {
                seen.push(*provider);
            }
        }
        seen
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            euroasia: EuroasiaConfig::default(),
            neo: NeoConfig::default(),
            gross: GrossConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_are_missing() {
        let config = EuroasiaConfig::new("http://x").with_credentials("user", "  ");
        assert!(config.credentials().is_none());
        assert!(NeoConfig::new("http://x").with_api_key("").api_key().is_none());
        assert_eq!(NeoConfig::new("http://x").with_api_key("k").api_key(), Some("k"));
    }

    #[test]
    fn defaults() {
        let config = ProvidersConfig::default();
        assert_eq!(config.order, ProviderId::ALL.to_vec());
        assert_eq!(config.neo.reference_ttl(), Duration::from_secs(300));
        assert!(config.euroasia.credentials().is_none());
    }

    #[test]
    fn order_is_deduplicated() {
        let config = ProvidersConfig {
            order: vec![ProviderId::Neo, ProviderId::Euroasia, ProviderId::Neo],
            ..ProvidersConfig::default()
        };
        assert_eq!(config.effective_order(), vec![ProviderId::Neo, ProviderId::Euroasia]);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ProvidersConfig =
            serde_json::from_str(r#"{"order":["gross","euroasia"],"neo":{"api_key":"k"}}"#)
                .unwrap_or_default();
        assert_eq!(config.order, vec![ProviderId::Gross, ProviderId::Euroasia]);
        assert_eq!(config.neo.api_key(), Some("k"));
        assert_eq!(config.neo.reference_ttl_secs, 300);
        assert_eq!(config.http_timeout_ms, 10_000);
    }
}
