//! # Provider Registry
//!
//! Ordered set of provider adapters. The order is the configured order in
//! which aggregated results are reported.

use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::config::ProvidersConfig;
use crate::infrastructure::providers::error::{ProviderError, ProviderOpResult};
use crate::infrastructure::providers::euroasia::EuroasiaAdapter;
use crate::infrastructure::providers::gross::GrossAdapter;
use crate::infrastructure::providers::neo::NeoAdapter;
use crate::infrastructure::providers::traits::{ProviderAdapter, ProviderDescriptor};
use crate::infrastructure::providers::unconfigured::UnconfiguredAdapter;
use std::sync::Arc;

/// Ordered provider adapters.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

/// Swaps a missing-credentials error for an adapter that reports it.
fn or_unconfigured<A: ProviderAdapter + 'static>(
    provider: ProviderId,
    built: ProviderOpResult<A>,
) -> ProviderOpResult<Arc<dyn ProviderAdapter>> {
    match built {
        Ok(adapter) => Ok(Arc::new(adapter)),
        Err(ProviderError::ConfigMissing { message }) => {
            tracing::warn!(%provider, missing = %message, "provider credentials not configured");
            Ok(Arc::new(UnconfiguredAdapter::new(provider, message)))
        }
        Err(e) => Err(e),
    }
}

impl ProviderRegistry {
    /// Creates a registry from adapters, keeping their order. Later
    /// duplicates of a provider are dropped.
    #[must_use]
    pub fn from_adapters(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        let mut unique: Vec<Arc<dyn ProviderAdapter>> = Vec::with_capacity(adapters.len());
        for adapter in adapters {
            if !unique.iter().any(|a| a.provider_id() == adapter.provider_id()) {
                unique.push(adapter);
            }
        }
        Self { adapters: unique }
    }

    /// Builds adapters for every provider in the configured order.
    ///
    /// Providers without credentials get an [`UnconfiguredAdapter`].
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Upstream` if an HTTP client cannot be built.
    pub fn from_config(config: &ProvidersConfig) -> ProviderOpResult<Self> {
        let timeout = config.http_timeout_ms;
        let adapters = config
            .effective_order()
            .into_iter()
            .map(|provider| match provider {
                ProviderId::Euroasia => or_unconfigured(
                    provider,
                    EuroasiaAdapter::from_config(&config.euroasia, timeout),
                ),
                ProviderId::Neo => {
                    or_unconfigured(provider, NeoAdapter::from_config(&config.neo, timeout))
                }
                ProviderId::Gross => {
                    let built = config
                        .gross
                        .api_key()
                        .map(|_| GrossAdapter::new())
                        .ok_or_else(|| ProviderError::config_missing("gross api key"));
                    or_unconfigured(provider, built)
                }
            })
            .collect::<ProviderOpResult<Vec<_>>>()?;

        Ok(Self::from_adapters(adapters))
    }

    /// Returns the adapter for `provider`, if registered.
    #[must_use]
    pub fn get(&self, provider: ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters
            .iter()
            .find(|a| a.provider_id() == provider)
            .cloned()
    }

    /// Returns every adapter in order.
    #[must_use]
    pub fn adapters(&self) -> &[Arc<dyn ProviderAdapter>] {
        &self.adapters
    }

    /// Returns the provider list in order with wiring state.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        self.adapters.iter().map(|a| a.descriptor()).collect()
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::providers::config::{EuroasiaConfig, NeoConfig};
    use crate::infrastructure::providers::traits::ProviderState;

    #[test]
    fn missing_credentials_become_unconfigured_adapters() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default()).unwrap();
        assert_eq!(registry.len(), 3);
        for descriptor in registry.descriptors() {
            assert_eq!(descriptor.state, ProviderState::ConfigMissing);
        }
    }

    #[test]
    fn configured_order_is_kept() {
        let config = ProvidersConfig {
            order: vec![ProviderId::Gross, ProviderId::Neo, ProviderId::Euroasia],
            euroasia: EuroasiaConfig::new("http://euroasia").with_credentials("u", "p"),
            neo: NeoConfig::new("http://neo").with_api_key("k"),
            ..ProvidersConfig::default()
        };
        let registry = ProviderRegistry::from_config(&config).unwrap();
        let descriptors = registry.descriptors();

        let order: Vec<_> = descriptors.iter().map(|d| d.provider).collect();
        assert_eq!(order, vec![ProviderId::Gross, ProviderId::Neo, ProviderId::Euroasia]);
        assert_eq!(descriptors[0].state, ProviderState::ConfigMissing);
        assert_eq!(descriptors[1].state, ProviderState::Configured);
        assert_eq!(descriptors[2].state, ProviderState::Configured);
    }

    #[test]
    fn gross_with_key_is_not_implemented() {
        let mut config = ProvidersConfig::default();
        config.gross.api_key = Some("k".to_string());
        let registry = ProviderRegistry::from_config(&config).unwrap();
        let gross = registry.get(ProviderId::Gross).unwrap();
        assert_eq!(gross.state(), ProviderState::NotImplemented);
    }

    #[test]
    fn partial_order_registers_only_listed_providers() {
        let config = ProvidersConfig {
            order: vec![ProviderId::Neo],
            ..ProvidersConfig::default()
        };
        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(ProviderId::Euroasia).is_none());
    }
}
