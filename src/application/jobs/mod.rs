//! # Background Jobs

pub mod offering_refresh;

pub use offering_refresh::{JobOutcome, OfferingRefreshJob};
