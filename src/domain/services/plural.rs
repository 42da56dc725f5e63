//! # Plural Forms
//!
//! Noun agreement for Russian and English duration phrases.
//!
//! Russian selects a form from the last digits of the number: numbers
//! ending in 1 (but not 11) take the singular, 2-4 (but not 12-14) take the
//! "few" form, everything else takes the genitive plural. Fractional
//! numbers always take the "few" form (`1,5 года`).
//!
//! # Examples
//!
//! ```
//! use partner_hub::domain::services::plural::DurationUnit;
//!
//! assert_eq!(DurationUnit::Year.russian("21"), "год");
//! assert_eq!(DurationUnit::Year.russian("3"), "года");
//! assert_eq!(DurationUnit::Year.russian("11"), "лет");
//! assert_eq!(DurationUnit::Year.russian_genitive("3"), "лет");
//! ```

use serde::{Deserialize, Serialize};

/// Russian plural category of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// Ends in 1, not in 11.
    One,
    /// Ends in 2-4, not in 12-14.
    Few,
    /// Everything else.
    Many,
    /// Has a fractional part.
    Fraction,
}

impl PluralCategory {
    /// Classifies a number written as digits, with `.` or `,` as decimal
    /// separator.
    #[must_use]
    pub fn of(number: &str) -> Self {
        let number = number.trim();
        let (whole, fraction) = number.split_once(['.', ',']).unwrap_or((number, ""));

        if fraction.chars().any(|c| c.is_ascii_digit() && c != '0') {
            return Self::Fraction;
        }

        let digits: String = whole.chars().filter(char::is_ascii_digit).collect();
        let tail = digits
            .get(digits.len().saturating_sub(2)..)
            .and_then(|t| t.parse::<u32>().ok())
            .unwrap_or(0);

        let last = tail % 10;
        let teen = (11..=14).contains(&tail);
        match last {
            1 if !teen => Self::One,
            2..=4 if !teen => Self::Few,
            _ => Self::Many,
        }
    }
}

/// Unit of a duration phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    /// `yil`.
    Year,
    /// `oy`.
    Month,
    /// `kun`.
    Day,
}

struct RussianForms {
    one: &'static str,
    few: &'static str,
    many: &'static str,
    genitive_one: &'static str,
}

impl DurationUnit {
    /// Parses the Uzbek unit word (`yil`, `oy`, `kun`), case-insensitively.
    #[must_use]
    pub fn from_uzbek(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "yil" => Some(Self::Year),
            "oy" => Some(Self::Month),
            "kun" => Some(Self::Day),
            _ => None,
        }
    }

    const fn forms(self) -> RussianForms {
        match self {
            Self::Year => RussianForms {
                one: "год",
                few: "года",
                many: "лет",
                genitive_one: "года",
            },
            Self::Month => RussianForms {
                one: "месяц",
                few: "месяца",
                many: "месяцев",
                genitive_one: "месяца",
            },
            Self::Day => RussianForms {
                one: "день",
                few: "дня",
                many: "дней",
                genitive_one: "дня",
            },
        }
    }

    /// Russian noun agreeing with `number` in the nominative
    /// (`5 лет`, `на 3 года`).
    #[must_use]
    pub fn russian(self, number: &str) -> &'static str {
        let forms = self.forms();
        match PluralCategory::of(number) {
            PluralCategory::One => forms.one,
            PluralCategory::Few | PluralCategory::Fraction => forms.few,
            PluralCategory::Many => forms.many,
        }
    }

    /// Russian noun agreeing with `number` after `от` / `до`
    /// (`до 1 года`, `до 3 лет`).
    #[must_use]
    pub fn russian_genitive(self, number: &str) -> &'static str {
        let forms = self.forms();
        match PluralCategory::of(number) {
            PluralCategory::One | PluralCategory::Fraction => forms.genitive_one,
            PluralCategory::Few | PluralCategory::Many => forms.many,
        }
    }

    /// English noun agreeing with `number`.
    #[must_use]
    pub fn english(self, number: &str) -> &'static str {
        let singular = number.trim() == "1";
        match (self, singular) {
            (Self::Year, true) => "year",
            (Self::Year, false) => "years",
            (Self::Month, true) => "month",
            (Self::Month, false) => "months",
            (Self::Day, true) => "day",
            (Self::Day, false) => "days",
        }
    }
}
