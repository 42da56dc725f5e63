//! # Offering Source Port
//!
//! The scraping side of the system is an external collaborator; the refresh
//! job sees it only through [`OfferingSource`].

use crate::domain::entities::RawOfferingRecord;
use crate::domain::value_objects::OfferingCategory;
use crate::infrastructure::http::UpstreamError;
use async_trait::async_trait;
use std::fmt;

/// Supplier of raw offering records.
#[async_trait]
pub trait OfferingSource: Send + Sync + fmt::Debug {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    /// Fetches every raw record of `category`.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` if the source cannot be read.
    async fn fetch(&self, category: OfferingCategory) -> Result<Vec<RawOfferingRecord>, UpstreamError>;
}
