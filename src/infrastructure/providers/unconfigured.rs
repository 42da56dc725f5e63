//! # Unconfigured Adapter
//!
//! Stand-in for a provider whose credentials are absent. It answers every
//! call with `ConfigMissing` without any network I/O, so the provider still
//! shows up in aggregated results.

use crate::domain::entities::QuoteRequest;
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::error::{ProviderError, ProviderOpResult};
use crate::infrastructure::providers::traits::{ProviderAdapter, ProviderQuote, ProviderState};
use async_trait::async_trait;

/// Adapter for a provider without credentials.
#[derive(Debug, Clone)]
pub struct UnconfiguredAdapter {
    provider: ProviderId,
    missing: String,
}

impl UnconfiguredAdapter {
    /// Creates the adapter; `missing` names the absent settings.
    #[must_use]
    pub fn new(provider: ProviderId, missing: impl Into<String>) -> Self {
        Self {
            provider,
            missing: missing.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for UnconfiguredAdapter {
    fn provider_id(&self) -> ProviderId {
        self.provider
    }

    fn state(&self) -> ProviderState {
        ProviderState::ConfigMissing
    }

    async fn calculate(&self, _request: &QuoteRequest) -> ProviderOpResult<ProviderQuote> {
        Err(ProviderError::config_missing(self.missing.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{DriverPolicy, VehicleIdentity};
    use crate::domain::entities::FailureKind;
    use crate::infrastructure::providers::gross::GrossAdapter;

    fn request() -> QuoteRequest {
        QuoteRequest::new(
            VehicleIdentity::new("01A123BC", "AAF", "1234567"),
            12,
            DriverPolicy::Unlimited,
        )
    }

    #[tokio::test]
    async fn unconfigured_fails_with_config_missing() {
        let adapter = UnconfiguredAdapter::new(ProviderId::Euroasia, "euroasia username/password");
        let err = adapter.calculate(&request()).await.unwrap_err();
        assert_eq!(err.failure_kind(), FailureKind::ConfigMissing);
        assert_eq!(err.http_status(), 501);
        assert!(err.to_string().starts_with("config missing"));
        assert_eq!(adapter.state(), ProviderState::ConfigMissing);
    }

    #[tokio::test]
    async fn gross_is_not_implemented() {
        let adapter = GrossAdapter::new();
        let err = adapter.calculate(&request()).await.unwrap_err();
        assert_eq!(err.failure_kind(), FailureKind::NotImplemented);
        assert_eq!(adapter.descriptor().state, ProviderState::NotImplemented);
    }
}
