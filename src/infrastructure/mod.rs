//! # Infrastructure Layer
//!
//! Adapters for everything outside the process: insurance provider APIs,
//! the translation API and its cache, the offering store and partner feeds.

pub mod feeds;
pub mod http;
pub mod persistence;
pub mod providers;
pub mod translation;
