//! # Token Cache
//!
//! In-memory cache for short-lived access tokens obtained through a login
//! call. A token is reused until its lifetime minus a safety margin has
//! passed, then refreshed lazily on the next call. Refreshes are serialized:
//! concurrent callers wait for the one login in flight instead of logging in
//! again.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default safety margin subtracted from the token lifetime.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_secs(60);

/// A token and the instant it stops being reused.
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// A freshly issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Access token.
    pub token: String,
    /// Lifetime reported by the issuer.
    pub expires_in: Duration,
}

/// Cache for one access token.
#[derive(Debug)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
    safety_margin: Duration,
}

impl TokenCache {
    /// Creates an empty cache with the given safety margin.
    #[must_use]
    pub fn new(safety_margin: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            safety_margin,
        }
    }

    /// Returns the cached token, or calls `login` and caches its result.
    ///
    /// # Errors
    ///
    /// Returns the error of `login`; nothing is cached in that case.
    pub async fn get_or_refresh<F, Fut, E>(&self, login: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<IssuedToken, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.token.clone());
            }
        }

        let issued = login().await?;
        let lifetime = issued.expires_in.saturating_sub(self.safety_margin);
        tracing::debug!(lifetime_secs = lifetime.as_secs(), "access token refreshed");

        *slot = match Instant::now().checked_add(lifetime) {
            Some(refresh_at) => Some(CachedToken {
                token: issued.token.clone(),
                refresh_at,
            }),
            None => {
                tracing::warn!(
                    expires_in_secs = issued.expires_in.as_secs(),
                    "token lifetime out of range, not caching"
                );
                None
            }
        };
        Ok(issued.token)
    }

    /// Drops the cached token so the next call logs in again.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_SAFETY_MARGIN)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn issued(token: &str, secs: u64) -> IssuedToken {
        IssuedToken {
            token: token.to_string(),
            expires_in: Duration::from_secs(secs),
        }
    }

    #[tokio::test]
    async fn token_is_reused_until_refresh_point() {
        let cache = TokenCache::default();
        let logins = AtomicUsize::new(0);

        for _ in 0..3 {
            let token = cache
                .get_or_refresh(|| async {
                    logins.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(issued("t1", 3600))
                })
                .await
                .unwrap();
            assert_eq!(token, "t1");
        }
        assert_eq!(logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lifetime_within_margin_is_not_reused() {
        let cache = TokenCache::default();
        let logins = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_refresh(|| async {
                    logins.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(issued("short", 30))
                })
                .await
                .unwrap();
        }
        assert_eq!(logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unrepresentable_lifetime_is_not_cached() {
        let cache = TokenCache::default();
        let logins = AtomicUsize::new(0);

        for _ in 0..2 {
            let token = cache
                .get_or_refresh(|| async {
                    logins.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(issued("forever", u64::MAX))
                })
                .await
                .unwrap();
            assert_eq!(token, "forever");
        }
        assert_eq!(logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_login_caches_nothing() {
        let cache = TokenCache::default();
        let err = cache
            .get_or_refresh(|| async { Err::<IssuedToken, _>("denied") })
            .await;
        assert_eq!(err, Err("denied"));

        let token = cache
            .get_or_refresh(|| async { Ok::<_, &str>(issued("t2", 3600)) })
            .await
            .unwrap();
        assert_eq!(token, "t2");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_login() {
        let cache = Arc::new(TokenCache::default());
        let logins = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let logins = Arc::clone(&logins);
                tokio::spawn(async move {
                    cache
                        .get_or_refresh(|| async {
                            logins.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            Ok::<_, ()>(issued("shared", 3600))
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }
        assert_eq!(logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_login() {
        let cache = TokenCache::default();
        cache
            .get_or_refresh(|| async { Ok::<_, ()>(issued("old", 3600)) })
            .await
            .unwrap();
        cache.invalidate().await;
        let token = cache
            .get_or_refresh(|| async { Ok::<_, ()>(issued("new", 3600)) })
            .await
            .unwrap();
        assert_eq!(token, "new");
    }
}
