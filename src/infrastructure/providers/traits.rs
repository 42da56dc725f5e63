//! # Provider Adapter Trait
//!
//! Port definition for insurance provider integrations.
//!
//! Each adapter turns the provider-agnostic [`QuoteRequest`] into its own
//! wire format, runs whatever lookups the provider needs before pricing and
//! maps the answer back to a [`QuotePremium`].
//!
//! # Examples
//!
//! ```ignore
//! use partner_hub::infrastructure::providers::traits::{ProviderAdapter, ProviderQuote};
//!
//! struct MyProvider { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl ProviderAdapter for MyProvider {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{QuotePremium, QuoteRequest};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::error::ProviderOpResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wiring state of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    /// Credentials present, calls go to the partner.
    Configured,
    /// Credentials absent, every call fails locally.
    ConfigMissing,
    /// Recognised provider without a pricing integration.
    NotImplemented,
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configured => "configured",
            Self::ConfigMissing => "config_missing",
            Self::NotImplemented => "not_implemented",
        };
        f.write_str(name)
    }
}

/// Provider entry as listed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    /// Provider.
    pub provider: ProviderId,
    /// Wiring state.
    pub state: ProviderState,
}

/// Successful pricing answer of one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderQuote {
    /// Normalized premium.
    pub premium: QuotePremium,
    /// Upstream pricing response as received.
    pub raw: serde_json::Value,
}

impl ProviderQuote {
    /// Creates a provider quote.
    #[must_use]
    pub fn new(premium: QuotePremium, raw: serde_json::Value) -> Self {
        Self { premium, raw }
    }
}

/// Port for insurance provider integrations.
///
/// Adapters receive the whole request but must only read their own payload
/// via [`QuoteRequest::payload_for`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync + fmt::Debug {
    /// Returns the provider this adapter talks to.
    fn provider_id(&self) -> ProviderId;

    /// Returns the wiring state.
    fn state(&self) -> ProviderState {
        ProviderState::Configured
    }

    /// Prices the request.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` for missing payload fields, failed
    /// lookups, upstream failures and unwired providers.
    async fn calculate(&self, request: &QuoteRequest) -> ProviderOpResult<ProviderQuote>;

    /// Returns the descriptor listed by the API.
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            provider: self.provider_id(),
            state: self.state(),
        }
    }
}
