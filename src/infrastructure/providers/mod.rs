//! # Insurance Providers
//!
//! Adapters for the OSAGO providers behind the aggregator.
//!
//! ## Providers
//!
//! - [`euroasia::EuroasiaAdapter`]: login token, vehicle classification, pricing
//! - [`neo::NeoAdapter`]: API key, vehicle group mapping, enveloped pricing
//! - [`gross::GrossAdapter`]: recognised but not wired up
//! - [`unconfigured::UnconfiguredAdapter`]: any provider without credentials
//!
//! ## Support
//!
//! - [`registry::ProviderRegistry`]: adapters in configured order
//! - [`token_cache::TokenCache`]: login token reuse
//! - [`reference_cache::ReferenceCache`]: short-TTL reference data memo

pub mod config;
pub mod error;
pub mod euroasia;
pub mod gross;
pub mod neo;
pub mod reference_cache;
pub mod registry;
pub mod token_cache;
pub mod traits;
pub mod unconfigured;

pub use config::{EuroasiaConfig, GrossConfig, NeoConfig, ProvidersConfig};
pub use error::{ProviderError, ProviderOpResult};
pub use euroasia::EuroasiaAdapter;
pub use gross::GrossAdapter;
pub use neo::NeoAdapter;
pub use registry::ProviderRegistry;
pub use traits::{ProviderAdapter, ProviderDescriptor, ProviderQuote, ProviderState};
pub use unconfigured::UnconfiguredAdapter;
