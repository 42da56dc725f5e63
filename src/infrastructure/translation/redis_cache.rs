//! # Redis Translation Cache
//!
//! Shared translation cache for all service instances. Uses a
//! `ConnectionManager`, which reconnects on its own; clones share one
//! multiplexed connection.

use crate::infrastructure::translation::error::{CacheError, CacheResult};
use crate::infrastructure::translation::traits::TranslationCache;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::fmt;
use std::time::Duration;

/// Translation cache stored in Redis with per-key expiry.
#[derive(Clone)]
pub struct RedisTranslationCache {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisTranslationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisTranslationCache").finish_non_exhaustive()
    }
}

impl RedisTranslationCache {
    /// Connects to Redis at `url`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// cannot be reached.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::connection(format!("invalid redis url: {e}")))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::connection(e.to_string()))?;
        tracing::info!("connected to redis translation cache");
        Ok(Self { connection })
    }
}

#[async_trait]
impl TranslationCache for RedisTranslationCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut connection = self.connection.clone();
        let seconds = ttl.as_secs().max(1);
        let () = connection.set_ex(key, value, seconds).await?;
        Ok(())
    }
}
