//! # Domain Layer
//!
//! Request and result types for provider aggregation, offering records and
//! the deterministic text rules behind normalization. Nothing in this layer
//! performs I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
