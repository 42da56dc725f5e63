//! # Application Services
//!
//! - [`quote_aggregation::QuoteAggregationEngine`]: provider fan-out and merge
//! - [`translation::TranslationPipeline`]: rules, cache, external translation
//! - [`offering_normalizer::OfferingNormalizer`]: raw to canonical offerings

pub mod offering_normalizer;
pub mod quote_aggregation;
pub mod translation;

pub use offering_normalizer::{OfferingNormalization, OfferingNormalizer};
pub use quote_aggregation::{AggregationConfig, QuoteAggregationEngine};
pub use translation::TranslationPipeline;
