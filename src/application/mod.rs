//! # Application Layer
//!
//! Use cases over the domain rules and the infrastructure ports.

pub mod error;
pub mod jobs;
pub mod services;
