//! # HTTP Partner Feed
//!
//! `GET {feed_url}?category={category}` returning a JSON array of raw
//! offering records. Records of another category are dropped.

use crate::domain::entities::RawOfferingRecord;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::feeds::traits::OfferingSource;
use crate::infrastructure::http::{HttpClient, UpstreamError, UpstreamResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_FEED_TIMEOUT_MS: u64 = 30_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_FEED_TIMEOUT_MS
}

/// Partner feed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed URL. Empty disables the feed.
    #[serde(default)]
    pub url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_ms: DEFAULT_FEED_TIMEOUT_MS,
        }
    }
}

impl FeedConfig {
    /// Returns true if a feed URL is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Offering source reading a partner JSON feed.
#[derive(Debug)]
pub struct HttpOfferingFeed {
    client: HttpClient,
    url: String,
}

impl HttpOfferingFeed {
    /// Creates a feed reader.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Internal` if the HTTP client cannot be built.
    pub fn from_config(config: &FeedConfig) -> UpstreamResult<Self> {
        Ok(Self {
            client: HttpClient::new(config.timeout_ms)?,
            url: config.url.trim().to_string(),
        })
    }
}

#[async_trait]
impl OfferingSource for HttpOfferingFeed {
    fn name(&self) -> &str {
        "partner-feed"
    }

    async fn fetch(&self, category: OfferingCategory) -> Result<Vec<RawOfferingRecord>, UpstreamError> {
        let records: Vec<RawOfferingRecord> = self
            .client
            .get_with_params(&self.url, &[("category", category.as_str())])
            .await?;
        let total = records.len();
        let records: Vec<_> = records.into_iter().filter(|r| r.category == category).collect();
        if records.len() != total {
            tracing::warn!(
                %category,
                dropped = total - records.len(),
                "feed returned records of another category"
            );
        }
        Ok(records)
    }
}
