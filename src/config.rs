//! # Application Configuration
//!
//! Layered settings: `config/default.toml`, then an optional
//! `config/local.toml`, then `APP__SECTION__KEY` environment variables.
//! A `.env` file is loaded into the environment first by `main`.
//!
//! Providers are switched on by the presence of their credentials, e.g.
//! `APP__PROVIDERS__NEO__API_KEY`.

use crate::application::services::AggregationConfig;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::feeds::FeedConfig;
use crate::infrastructure::providers::ProvidersConfig;
use crate::infrastructure::translation::TranslationConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "APP";

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if host and port do not form an address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address: {e}")))
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Database settings. Without a URL offerings are kept in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Returns the URL when present and non-blank.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

fn default_refresh_interval_secs() -> u64 {
    24 * 60 * 60
}

fn default_refresh_categories() -> Vec<OfferingCategory> {
    OfferingCategory::ALL.to_vec()
}

/// Periodic offering refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Run the job on a timer. Needs a feed URL.
    #[serde(default)]
    pub enabled: bool,
    /// Seconds between runs.
    #[serde(default = "default_refresh_interval_secs")]
    pub interval_secs: u64,
    /// Categories refreshed on each run.
    #[serde(default = "default_refresh_categories")]
    pub categories: Vec<OfferingCategory>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_refresh_interval_secs(),
            categories: default_refresh_categories(),
        }
    }
}

impl RefreshConfig {
    /// Returns the period between runs, never zero.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
    /// Insurance providers.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Provider fan-out.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// External translation and cache.
    #[serde(default)]
    pub translation: TranslationConfig,
    /// Offering store.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Partner offering feed.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Periodic refresh.
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl AppConfig {
    /// Loads `config/default.toml`, `config/local.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Loads the layered configuration from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source is malformed.
    pub fn load_from(dir: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")).required(false))
            .add_source(File::with_name(&format!("{dir}/local")).required(false))
            .add_source(environment())
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parses a TOML document, without files or environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the document is malformed.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("providers.order")
        .with_list_parse_key("refresh.categories")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProviderId;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.aggregation.per_provider_timeout_ms, 15_000);
        assert_eq!(config.translation.cache_ttl_secs, 2_592_000);
        assert!(!config.refresh.enabled);
    }

    #[test]
    fn sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [log]
            format = "json"

            [providers]
            order = ["neo", "euroasia"]

            [providers.neo]
            base_url = "https://neo.example"
            api_key = "k"
            reference_ttl_secs = 0

            [refresh]
            enabled = true
            interval_secs = 3600
            categories = ["deposit", "auto_loan"]
            "#,
        )
        .unwrap();

        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.providers.order, vec![ProviderId::Neo, ProviderId::Euroasia]);
        assert_eq!(config.providers.neo.api_key(), Some("k"));
        assert_eq!(config.providers.neo.reference_ttl_secs, 0);
        assert_eq!(config.refresh.interval(), Duration::from_secs(3600));
        assert_eq!(
            config.refresh.categories,
            vec![OfferingCategory::Deposit, OfferingCategory::AutoLoan]
        );
    }

    #[test]
    fn bad_address_is_invalid() {
        let server = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(matches!(server.socket_addr(), Err(ConfigError::Invalid(_))));
    }
}
