//! # Translation Ports
//!
//! The normalization pipeline depends only on these two traits; the HTTP
//! backend and the Redis cache are wired in at startup, and tests swap in
//! fakes.

use crate::domain::value_objects::Locale;
use crate::infrastructure::translation::error::{CacheResult, TranslationResult};
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// External machine translation from Uzbek (Latin).
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translates `text` into `target`.
    ///
    /// # Errors
    ///
    /// Returns a `TranslationError` if the backend is not configured, the
    /// locale is unsupported, or the call fails.
    async fn translate(&self, text: &str, target: Locale) -> TranslationResult<String>;
}

/// Key-value store for translated strings.
#[async_trait]
pub trait TranslationCache: Send + Sync + Debug {
    /// Returns the cached value for `key`, `None` on a miss.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the store cannot be read.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the store cannot be written.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}
