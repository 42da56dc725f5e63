//! # In-Memory Repositories
//!
//! In-memory implementations for running without a database and for tests.
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod offering_repository;

pub use offering_repository::InMemoryOfferingRepository;
