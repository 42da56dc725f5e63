//! # PostgreSQL Repositories

pub mod offering_repository;

pub use offering_repository::PostgresOfferingRepository;
