//! # Offerings
//!
//! Raw scraped bank offerings and their canonical four-locale form.

use crate::domain::value_objects::{Locale, OfferingCategory};
use serde::{Deserialize, Serialize};

/// A scraped or partner-supplied offering with free-text fields.
///
/// Produced by the scraping collaborator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOfferingRecord {
    /// Offering category.
    pub category: OfferingCategory,
    /// Bank name as scraped.
    pub bank_name: String,
    /// Product name or description.
    #[serde(default)]
    pub description: String,
    /// Rate text, e.g. `18% dan 24% gacha`.
    #[serde(default)]
    pub rate: String,
    /// Term text, e.g. `36 oygacha`.
    #[serde(default)]
    pub term: String,
    /// Amount text, e.g. `500 mln so'mgacha`.
    #[serde(default)]
    pub amount: String,
    /// Application channel text, e.g. `Onlayn`.
    #[serde(default)]
    pub channel: String,
}

/// One text rendered in all four locales.
///
/// Every field is always present; an empty source gives empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Uzbek, Latin script.
    pub uz: String,
    /// Russian.
    pub ru: String,
    /// English.
    pub en: String,
    /// Uzbek, Cyrillic script.
    pub oz: String,
}

impl LocalizedText {
    /// Creates a localized text from its four renderings.
    #[must_use]
    pub fn new(
        uz: impl Into<String>,
        ru: impl Into<String>,
        en: impl Into<String>,
        oz: impl Into<String>,
    ) -> Self {
        Self {
            uz: uz.into(),
            ru: ru.into(),
            en: en.into(),
            oz: oz.into(),
        }
    }

    /// Returns the rendering for `locale`.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Uz => &self.uz,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
            Locale::Oz => &self.oz,
        }
    }

    /// Returns true if every rendering is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Locale::ALL.iter().all(|l| self.get(*l).is_empty())
    }
}

/// Offering fields in a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingFields {
    /// Product name or description.
    pub description: String,
    /// Rate.
    pub rate: String,
    /// Term.
    pub term: String,
    /// Amount.
    pub amount: String,
    /// Application channel.
    pub channel: String,
}

/// Canonical offering: canonical bank name plus one field set per locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOffering {
    /// Offering category.
    pub category: OfferingCategory,
    /// Canonical bank display name.
    pub bank_name: String,
    /// Uzbek (Latin) fields.
    pub uz: OfferingFields,
    /// Russian fields.
    pub ru: OfferingFields,
    /// English fields.
    pub en: OfferingFields,
    /// Uzbek (Cyrillic) fields.
    pub oz: OfferingFields,
}

impl CanonicalOffering {
    /// Assembles a canonical offering from per-field localized texts.
    #[must_use]
    pub fn from_localized(
        category: OfferingCategory,
        bank_name: String,
        description: LocalizedText,
        rate: LocalizedText,
        term: LocalizedText,
        amount: LocalizedText,
        channel: LocalizedText,
    ) -> Self {
        let fields = |locale: Locale| OfferingFields {
            description: description.get(locale).to_string(),
            rate: rate.get(locale).to_string(),
            term: term.get(locale).to_string(),
            amount: amount.get(locale).to_string(),
            channel: channel.get(locale).to_string(),
        };

        Self {
            category,
            bank_name,
            uz: fields(Locale::Uz),
            ru: fields(Locale::Ru),
            en: fields(Locale::En),
            oz: fields(Locale::Oz),
        }
    }

    /// Returns the field set for `locale`.
    #[must_use]
    pub fn fields(&self, locale: Locale) -> &OfferingFields {
        match locale {
            Locale::Uz => &self.uz,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
            Locale::Oz => &self.oz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_localized_spreads_fields_per_locale() {
        let text = |s: &str| LocalizedText::new(format!("{s}-uz"), format!("{s}-ru"), format!("{s}-en"), format!("{s}-oz"));
        let offering = CanonicalOffering::from_localized(
            OfferingCategory::Loan,
            "Kapitalbank".to_string(),
            text("d"),
            text("r"),
            text("t"),
            text("a"),
            LocalizedText::default(),
        );

        assert_eq!(offering.ru.rate, "r-ru");
        assert_eq!(offering.fields(Locale::Oz).term, "t-oz");
        assert_eq!(offering.en.channel, "");
    }

    #[test]
    fn default_localized_text_is_empty_not_missing() {
        let text = LocalizedText::default();
        assert!(text.is_empty());
        assert_eq!(text.get(Locale::Oz), "");
    }
}
