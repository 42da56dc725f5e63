//! # Persistence Layer
//!
//! Serving store for canonical offerings.
//!
//! ## Repository Traits (Ports)
//!
//! - [`OfferingRepository`]: atomic per-category replacement and reads
//!
//! ## Implementations
//!
//! - `in_memory`: used without a database and in tests
//! - `postgres`: PostgreSQL via sqlx, one transaction per refresh

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{OfferingRepository, RepositoryError, RepositoryResult};
