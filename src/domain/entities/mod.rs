//! # Domain Entities
//!
//! ## Aggregation
//!
//! - [`QuoteRequest`]: provider-agnostic OSAGO request with tagged payloads
//! - [`ProviderResult`]: per-provider success or failure
//! - [`AggregatedQuote`]: ordered envelope of provider results
//!
//! ## Normalization
//!
//! - [`RawOfferingRecord`]: scraped offering with free-text fields
//! - [`CanonicalOffering`]: canonical bank name plus four locale field sets

pub mod offering;
pub mod provider_result;
pub mod quote_request;

pub use offering::{CanonicalOffering, LocalizedText, OfferingFields, RawOfferingRecord};
pub use provider_result::{
    AggregatedQuote, FailureKind, ProviderOutcome, ProviderResult, QuotePremium,
};
pub use quote_request::{
    DriverPolicy, EuroasiaPayload, NeoPayload, ProviderPayload, QuoteRequest, VehicleIdentity,
};
