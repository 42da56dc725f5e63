//! # Domain Services
//!
//! Pure, deterministic text rules used by the normalization pipeline.
//!
//! ## Services
//!
//! - [`text`]: apostrophe folding, whitespace cleanup, script detection
//! - [`plural`]: Russian and English noun agreement for durations
//! - [`transliteration`]: Latin to Cyrillic Uzbek
//! - [`bank_names::BankNameNormalizer`]: bank name canonicalization
//! - [`rules`]: structural rewrites of rates, amounts and terms
//! - [`phrases`]: known product and channel phrases
//! - [`dictionary`]: word-by-word fallback

pub mod bank_names;
pub mod dictionary;
pub mod phrases;
pub mod plural;
pub mod rules;
pub mod text;
pub mod transliteration;

pub use bank_names::BankNameNormalizer;
pub use plural::{DurationUnit, PluralCategory};
pub use transliteration::to_cyrillic;
