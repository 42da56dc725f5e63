//! # Offering Feeds
//!
//! Sources of raw offering records for the refresh job.

pub mod http_feed;
pub mod traits;

pub use http_feed::{FeedConfig, HttpOfferingFeed};
pub use traits::OfferingSource;
