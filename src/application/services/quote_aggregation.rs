//! # Quote Aggregation Engine
//!
//! Fans one OSAGO request out to every registered provider.
//!
//! Each adapter runs in its own task under a per-provider timeout. Handles
//! are joined in registry order, so results come back in configured order
//! whatever the completion order. Adapter errors, timeouts and task
//! failures all become per-provider [`ProviderResult`] failures; once the
//! request has validated, aggregation never fails as a whole.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{AggregatedQuote, FailureKind, ProviderResult, QuoteRequest};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::{ProviderAdapter, ProviderDescriptor, ProviderRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

const DEFAULT_PER_PROVIDER_TIMEOUT_MS: u64 = 15_000;

fn default_per_provider_timeout_ms() -> u64 {
    DEFAULT_PER_PROVIDER_TIMEOUT_MS
}

/// Configuration for quote aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Budget for one provider, including its nested lookups, in milliseconds.
    #[serde(default = "default_per_provider_timeout_ms")]
    pub per_provider_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            per_provider_timeout_ms: DEFAULT_PER_PROVIDER_TIMEOUT_MS,
        }
    }
}

impl AggregationConfig {
    /// Sets the per-provider timeout.
    #[must_use]
    pub fn with_per_provider_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_provider_timeout_ms = timeout_ms;
        self
    }

    /// Returns the per-provider timeout.
    #[must_use]
    pub fn per_provider_timeout(&self) -> Duration {
        Duration::from_millis(self.per_provider_timeout_ms)
    }
}

/// Engine for collecting quotes from every provider.
#[derive(Debug, Clone)]
pub struct QuoteAggregationEngine {
    registry: Arc<ProviderRegistry>,
    config: AggregationConfig,
}

impl QuoteAggregationEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, config: AggregationConfig) -> Self {
        Self { registry, config }
    }

    /// Creates a new engine with default configuration.
    #[must_use]
    pub fn with_defaults(registry: Arc<ProviderRegistry>) -> Self {
        Self::new(registry, AggregationConfig::default())
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the providers in configured order with their wiring state.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderDescriptor> {
        self.registry.descriptors()
    }

    /// Prices `request` with every provider.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the request fails validation;
    /// no provider is called in that case.
    pub async fn calculate_all(&self, request: QuoteRequest) -> ApplicationResult<AggregatedQuote> {
        request.validate()?;

        let request = Arc::new(request);
        let per_provider = self.config.per_provider_timeout();
        let started = Instant::now();

        let handles: Vec<_> = self
            .registry
            .adapters()
            .iter()
            .map(|adapter| {
                let adapter = Arc::clone(adapter);
                let request = Arc::clone(&request);
                let provider = adapter.provider_id();
                let handle =
                    tokio::spawn(async move { run_adapter(adapter, &request, per_provider).await });
                (provider, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (provider, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(%provider, error = %e, "provider task failed");
                    ProviderResult::failure(provider, FailureKind::Upstream, "task failed")
                }
            };
            results.push(result);
        }

        let quote = AggregatedQuote::new(results);
        tracing::info!(
            providers = quote.results.len(),
            succeeded = quote.success_count(),
            elapsed_ms = elapsed_ms(started),
            "aggregation finished"
        );
        Ok(quote)
    }

    /// Prices `request` with one provider, given by name.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` for an unknown or unregistered
    /// provider and `ApplicationError::Domain` if the request fails
    /// validation.
    pub async fn calculate_one(
        &self,
        provider: &str,
        request: QuoteRequest,
    ) -> ApplicationResult<ProviderResult> {
        let adapter = provider
            .parse::<ProviderId>()
            .ok()
            .and_then(|id| self.registry.get(id))
            .ok_or_else(|| ApplicationError::not_found("provider", provider))?;
        request.validate()?;

        Ok(run_adapter(adapter, &request, self.config.per_provider_timeout()).await)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Runs one adapter under `budget` and folds every outcome into a result.
async fn run_adapter(
    adapter: Arc<dyn ProviderAdapter>,
    request: &QuoteRequest,
    budget: Duration,
) -> ProviderResult {
    let provider = adapter.provider_id();
    let started = Instant::now();

    let result = match timeout(budget, adapter.calculate(request)).await {
        Ok(Ok(quote)) => ProviderResult::success(provider, quote.premium, quote.raw),
        Ok(Err(e)) => ProviderResult::failure(provider, e.failure_kind(), e.to_string()),
        Err(_) => ProviderResult::failure(
            provider,
            FailureKind::Timeout,
            format!("provider timed out after {}ms", budget.as_millis()),
        ),
    };

    let elapsed_ms = elapsed_ms(started);
    if result.is_success() {
        tracing::info!(%provider, success = true, status = result.status(), elapsed_ms, "provider call finished");
    } else {
        tracing::warn!(
            %provider,
            success = false,
            status = result.status(),
            elapsed_ms,
            reason = result.reason().unwrap_or_default(),
            "provider call finished"
        );
    }
    result
}
