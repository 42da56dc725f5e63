//! # Partner Hub
//!
//! Backend for a financial-products marketplace. It does two jobs:
//!
//! - **OSAGO aggregation**: one motor-liability request is priced by every
//!   configured insurance provider concurrently, and each provider's
//!   outcome is reported on its own.
//! - **Offering normalization**: scraped bank offerings get canonical bank
//!   names and every free-text field rendered in Uzbek Latin, Russian,
//!   English and Uzbek Cyrillic.
//!
//! # Layers
//!
//! - [`domain`]: request and result types, deterministic text rules
//! - [`application`]: aggregation engine, translation pipeline, refresh job
//! - [`infrastructure`]: provider adapters, translation backends, stores
//! - [`api`]: REST endpoints
//! - [`config`]: layered settings

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
