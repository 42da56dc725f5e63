//! # HTTP
//!
//! Outbound JSON-over-HTTP plumbing shared by every partner integration.

pub mod client;
pub mod error;

pub use client::{HttpClient, bearer, single_header};
pub use error::{UpstreamError, UpstreamResult};
