//! # Translation Infrastructure
//!
//! External machine translation and the translation cache.
//!
//! - [`traits::TranslationBackend`] / [`http_backend::HttpTranslationBackend`]
//! - [`traits::TranslationCache`] / [`redis_cache::RedisTranslationCache`],
//!   [`in_memory_cache::InMemoryTranslationCache`]

pub mod config;
pub mod error;
pub mod http_backend;
pub mod in_memory_cache;
pub mod redis_cache;
pub mod traits;

pub use config::TranslationConfig;
pub use error::{CacheError, CacheResult, TranslationError, TranslationResult};
pub use http_backend::HttpTranslationBackend;
pub use in_memory_cache::InMemoryTranslationCache;
pub use redis_cache::RedisTranslationCache;
pub use traits::{TranslationBackend, TranslationCache};
