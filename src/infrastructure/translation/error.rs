//! # Translation Errors
//!
//! Errors of the external translation backend and of the translation
//! cache. Neither ever reaches a caller of the normalization pipeline: both
//! are logged and replaced by the source text or a cache miss.

use crate::infrastructure::http::UpstreamError;
use thiserror::Error;

/// Error from the external translation backend.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// No API key is configured.
    #[error("translation backend not configured")]
    NotConfigured,

    /// The target locale is never translated externally.
    #[error("unsupported target locale: {locale}")]
    UnsupportedLocale {
        /// Locale code.
        locale: String,
    },

    /// Transport, status or parse failure.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The response carried no translation.
    #[error("translation response is empty")]
    EmptyResponse,
}

impl TranslationError {
    /// Creates an unsupported locale error.
    #[must_use]
    pub fn unsupported_locale(locale: impl Into<String>) -> Self {
        Self::UnsupportedLocale {
            locale: locale.into(),
        }
    }

    /// Returns true if the backend was reached and failed.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::EmptyResponse)
    }
}

/// Result type for translation backend calls.
pub type TranslationResult<T> = Result<T, TranslationError>;

/// Error from the translation cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The store could not be reached.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// A command failed.
    #[error("cache command error: {0}")]
    Command(String),
}

impl CacheError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a command error.
    #[must_use]
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(error: redis::RedisError) -> Self {
        if error.is_io_error() || error.is_connection_dropped() || error.is_connection_refusal() {
            Self::connection(error.to_string())
        } else {
            Self::command(error.to_string())
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_classification() {
        assert!(TranslationError::EmptyResponse.is_upstream());
        assert!(TranslationError::from(UpstreamError::status(500, "boom")).is_upstream());
        assert!(!TranslationError::NotConfigured.is_upstream());
        assert_eq!(
            TranslationError::unsupported_locale("oz").to_string(),
            "unsupported target locale: oz"
        );
    }
}
