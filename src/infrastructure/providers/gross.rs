//! # Gross Adapter
//!
//! Gross is a recognised provider whose pricing integration is not wired
//! up. Every call fails locally with `NotImplemented`; no request leaves the
//! process.

use crate::domain::entities::QuoteRequest;
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::error::{ProviderError, ProviderOpResult};
use crate::infrastructure::providers::traits::{ProviderAdapter, ProviderQuote, ProviderState};
use async_trait::async_trait;

/// Adapter for Gross Insurance.
#[derive(Debug, Clone, Default)]
pub struct GrossAdapter;

impl GrossAdapter {
    /// Creates the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProviderAdapter for GrossAdapter {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Gross
    }

    fn state(&self) -> ProviderState {
        ProviderState::NotImplemented
    }

    async fn calculate(&self, _request: &QuoteRequest) -> ProviderOpResult<ProviderQuote> {
        Err(ProviderError::not_implemented(
            "gross pricing integration is not available",
        ))
    }
}
