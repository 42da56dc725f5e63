//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`Locale`] - The four output locales of normalized records
//! - [`ProviderId`] - Known insurance providers behind the aggregator
//! - [`OfferingCategory`] - Kinds of scraped bank offerings
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output locale of a normalized record.
///
/// `Uz` is Latin-script Uzbek (the source language of scraped data),
/// `Oz` is Cyrillic-script Uzbek and is always derived by transliteration.
///
/// # Examples
///
/// ```
/// use partner_hub::domain::value_objects::enums::Locale;
///
/// assert_eq!("ru".parse::<Locale>().unwrap(), Locale::Ru);
/// assert!(Locale::Oz.is_derived());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Uzbek, Latin script.
    #[default]
    Uz,
    /// Russian.
    Ru,
    /// English.
    En,
    /// Uzbek, Cyrillic script.
    Oz,
}

impl Locale {
    /// All locales in output order.
    pub const ALL: [Locale; 4] = [Self::Uz, Self::Ru, Self::En, Self::Oz];

    /// Returns the lowercase locale code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Uz => "uz",
            Self::Ru => "ru",
            Self::En => "en",
            Self::Oz => "oz",
        }
    }

    /// Returns true if this locale is never translated on its own.
    #[inline]
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::Oz)
    }

    /// Returns true if an external translation backend may be asked for
    /// this locale.
    #[inline]
    #[must_use]
    pub const fn is_externally_translated(self) -> bool {
        matches!(self, Self::Ru | Self::En)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uz" | "uz-latn" => Ok(Self::Uz),
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            "oz" | "uz-cyrl" => Ok(Self::Oz),
            _ => Err(ParseEnumError::InvalidValue("Locale", s.to_string())),
        }
    }
}

/// Insurance provider known to the aggregator.
///
/// The declaration order is the default configured order in which results
/// are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Euroasia Insurance.
    Euroasia,
    /// NEO Insurance.
    Neo,
    /// Gross Insurance.
    Gross,
}

impl ProviderId {
    /// All providers in default order.
    pub const ALL: [ProviderId; 3] = [Self::Euroasia, Self::Neo, Self::Gross];

    /// Returns the provider name as used in URLs and envelopes.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euroasia => "euroasia",
            Self::Neo => "neo",
            Self::Gross => "gross",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "euroasia" | "euro-asia" => Ok(Self::Euroasia),
            "neo" => Ok(Self::Neo),
            "gross" => Ok(Self::Gross),
            _ => Err(ParseEnumError::InvalidValue("ProviderId", s.to_string())),
        }
    }
}

/// Category of a scraped bank offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingCategory {
    /// Consumer and other loans.
    Loan,
    /// Mortgage loans.
    Mortgage,
    /// Car loans.
    AutoLoan,
    /// Microloans.
    Microloan,
    /// Deposits.
    Deposit,
    /// Debit and credit cards.
    Card,
}

impl OfferingCategory {
    /// All categories.
    pub const ALL: [OfferingCategory; 6] = [
        Self::Loan,
        Self::Mortgage,
        Self::AutoLoan,
        Self::Microloan,
        Self::Deposit,
        Self::Card,
    ];

    /// Returns the snake_case name used in URLs and storage.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::Mortgage => "mortgage",
            Self::AutoLoan => "auto_loan",
            Self::Microloan => "microloan",
            Self::Deposit => "deposit",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for OfferingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferingCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "loan" => Ok(Self::Loan),
            "mortgage" => Ok(Self::Mortgage),
            "auto_loan" | "autoloan" => Ok(Self::AutoLoan),
            "microloan" => Ok(Self::Microloan),
            "deposit" => Ok(Self::Deposit),
            "card" => Ok(Self::Card),
            _ => Err(ParseEnumError::InvalidValue("OfferingCategory", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
