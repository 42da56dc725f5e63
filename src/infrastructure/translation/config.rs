//! # Translation Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Thirty days.
const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

/// External translation and cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translation API endpoint.
    #[serde(default)]
    pub base_url: String,
    /// API key, sent as the `key` query parameter. Absent disables the backend.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Cache entry lifetime in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Redis URL. Absent selects the in-process cache.
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl TranslationConfig {
    /// Returns the API key when present and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Returns the Redis URL when present and non-blank.
    #[must_use]
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// Returns the cache entry lifetime.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            redis_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_thirty_day_ttl() {
        let config = TranslationConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(2_592_000));
        assert!(config.api_key().is_none());
        assert!(config.redis_url().is_none());
    }
}
