//! # Value Objects
//!
//! Small immutable types shared across the domain.
//!
//! ## Domain Enums
//!
//! - [`Locale`]: uz / ru / en / oz output locales
//! - [`ProviderId`]: insurance providers behind the aggregator
//! - [`OfferingCategory`]: kinds of scraped bank offerings

pub mod enums;

pub use enums::{Locale, OfferingCategory, ParseEnumError, ProviderId};
