//! # Reference Cache
//!
//! Short-TTL memo for provider reference data (vehicle group lists). A zero
//! TTL disables caching and every call fetches.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default reference data lifetime.
pub const DEFAULT_REFERENCE_TTL: Duration = Duration::from_secs(300);

/// Memo for one reference list.
#[derive(Debug)]
pub struct ReferenceCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(Instant, T)>>,
}

impl<T: Clone> ReferenceCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns true if values are memoized at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns the memoized value, or runs `fetch` and memoizes its result.
    ///
    /// # Errors
    ///
    /// Returns the error of `fetch`; failures are never memoized.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.is_enabled() {
            return fetch().await;
        }

        let mut slot = self.slot.lock().await;
        if let Some((fetched_at, value)) = slot.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                return Ok(value.clone());
            }
        }

        let value = fetch().await?;
        *slot = Some((Instant::now(), value.clone()));
        Ok(value)
    }
}

impl<T: Clone> Default for ReferenceCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_TTL)
    }
}
