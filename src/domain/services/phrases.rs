//! # Known Phrases
//!
//! Curated product and channel names with precomposed translations in
//! every locale. A phrase matches when it is the whole text, a prefix or a
//! suffix of it, or covers more than 70% of its characters; short phrases
//! buried in long text are left to the word dictionary.

use crate::domain::services::text::find_ignore_case;
use crate::domain::value_objects::Locale;
use std::ops::Range;
use std::sync::LazyLock;

/// A phrase with its four renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    /// Uzbek (Latin) source form, apostrophes folded.
    pub uz: &'static str,
    /// Russian.
    pub ru: &'static str,
    /// English.
    pub en: &'static str,
    /// Uzbek (Cyrillic).
    pub oz: &'static str,
}

impl Phrase {
    const fn new(
        uz: &'static str,
        ru: &'static str,
        en: &'static str,
        oz: &'static str,
    ) -> Self {
        Self { uz, ru, en, oz }
    }

    /// Returns the rendering for `locale`.
    #[must_use]
    pub const fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Uz => self.uz,
            Locale::Ru => self.ru,
            Locale::En => self.en,
            Locale::Oz => self.oz,
        }
    }
}

const PHRASES: &[Phrase] = &[
    Phrase::new("Ta'lim krediti", "Образовательный кредит", "Education loan", "Таълим кредити"),
    Phrase::new("Iste'mol krediti", "Потребительский кредит", "Consumer loan", "Истеъмол кредити"),
    Phrase::new("Ipoteka krediti", "Ипотечный кредит", "Mortgage loan", "Ипотека кредити"),
    Phrase::new("Avtokredit", "Автокредит", "Car loan", "Автокредит"),
    Phrase::new("Mikrokredit", "Микрокредит", "Microcredit", "Микрокредит"),
    Phrase::new("Mikroqarz", "Микрозайм", "Microloan", "Микроқарз"),
    Phrase::new("Onlayn mikroqarz", "Онлайн микрозайм", "Online microloan", "Онлайн микроқарз"),
    Phrase::new("Kredit karta", "Кредитная карта", "Credit card", "Кредит карта"),
    Phrase::new("Debet karta", "Дебетовая карта", "Debit card", "Дебет карта"),
    Phrase::new("Muddatli omonat", "Срочный вклад", "Term deposit", "Муддатли омонат"),
    Phrase::new("Jamg'arma omonati", "Накопительный вклад", "Savings deposit", "Жамғарма омонати"),
    Phrase::new("Valyuta omonati", "Валютный вклад", "Foreign currency deposit", "Валюта омонати"),
    Phrase::new(
        "Talab qilib olinguncha omonat",
        "Вклад до востребования",
        "Demand deposit",
        "Талаб қилиб олингунча омонат",
    ),
    Phrase::new("Bank filialida", "В отделении банка", "At a bank branch", "Банк филиалида"),
    Phrase::new("Bank ofisida", "В офисе банка", "At a bank office", "Банк офисида"),
    Phrase::new(
        "Onlayn va bank filialida",
        "Онлайн и в отделении банка",
        "Online and at a bank branch",
        "Онлайн ва банк филиалида",
    ),
    Phrase::new(
        "Mobil ilova orqali",
        "Через мобильное приложение",
        "Via mobile app",
        "Мобил илова орқали",
    ),
    Phrase::new("Onlayn ariza", "Онлайн-заявка", "Online application", "Онлайн ариза"),
    Phrase::new("Garovsiz", "Без залога", "Without collateral", "Гаровсиз"),
    Phrase::new("Kafillik asosida", "Под поручительство", "With a guarantor", "Кафиллик асосида"),
    Phrase::new(
        "Birlamchi bozordan uy-joy",
        "Жильё на первичном рынке",
        "Primary market housing",
        "Бирламчи бозордан уй-жой",
    ),
    Phrase::new(
        "Ikkilamchi bozordan uy-joy",
        "Жильё на вторичном рынке",
        "Secondary market housing",
        "Иккиламчи бозордан уй-жой",
    ),
    Phrase::new("Yangi avtomobil", "Новый автомобиль", "New car", "Янги автомобил"),
    Phrase::new("Davlat dasturi", "Государственная программа", "Government programme", "Давлат дастури"),
];

/// Phrases ordered longest first so compound names win over their parts.
static BY_LENGTH: LazyLock<Vec<&'static Phrase>> = LazyLock::new(|| {
    let mut phrases: Vec<_> = PHRASES.iter().collect();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.uz.chars().count()));
    phrases
});

fn is_boundary(text: &str, range: &Range<usize>) -> bool {
    let before = text
        .get(..range.start)
        .and_then(|s| s.chars().next_back())
        .is_none_or(|c| !c.is_alphanumeric());
    let after = text
        .get(range.end..)
        .and_then(|s| s.chars().next())
        .is_none_or(|c| !c.is_alphanumeric());
    before && after
}

fn accepts(text: &str, phrase: &Phrase, range: &Range<usize>) -> bool {
    if !is_boundary(text, range) {
        return false;
    }
    let prefix = range.start == 0;
    let suffix = range.end == text.len();
    let phrase_len = phrase.uz.chars().count();
    let text_len = text.chars().count();
    prefix || suffix || phrase_len * 10 > text_len * 7
}

/// Returns the phrase that is exactly `text`, ignoring case.
#[must_use]
pub fn whole_text(text: &str) -> Option<&'static Phrase> {
    let trimmed = text.trim();
    BY_LENGTH.iter().copied().find(|p| {
        find_ignore_case(trimmed, p.uz).is_some_and(|r| r.start == 0 && r.end == trimmed.len())
    })
}

/// Replaces every accepted phrase occurrence with its `locale` rendering.
///
/// Returns `None` when no phrase matched.
#[must_use]
pub fn apply(text: &str, locale: Locale) -> Option<String> {
    let mut current = text.to_string();
    let mut applied = false;

    for phrase in BY_LENGTH.iter() {
        let Some(range) = find_ignore_case(&current, phrase.uz) else {
            continue;
        };
        if !accepts(&current, phrase, &range) {
            continue;
        }

        let source_lower = current
            .get(range.clone())
            .and_then(|s| s.chars().next())
            .is_some_and(char::is_lowercase);
        let rendering = phrase.get(locale);
        let replacement = if range.start > 0 && source_lower {
            rendering.to_lowercase()
        } else {
            rendering.to_string()
        };

        current.replace_range(range, &replacement);
        applied = true;
    }

    applied.then_some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_text_match_is_case_insensitive() {
        let phrase = whole_text("ta'lim KREDITI");
        assert_eq!(phrase.map(|p| p.oz), Some("Таълим кредити"));
        assert!(whole_text("Ta'lim krediti 2024").is_none());
    }

    #[test]
    fn whole_prefix_and_suffix_matches() {
        assert_eq!(apply("Ta'lim krediti", Locale::Ru).as_deref(), Some("Образовательный кредит"));
        assert_eq!(apply("Mikroqarz Plus", Locale::En).as_deref(), Some("Microloan Plus"));
        assert_eq!(apply("Yangi mikroqarz", Locale::Ru).as_deref(), Some("Yangi микрозайм"));
    }

    #[test]
    fn longest_phrase_wins() {
        assert_eq!(
            apply("Onlayn va bank filialida", Locale::En).as_deref(),
            Some("Online and at a bank branch")
        );
        assert_eq!(apply("Onlayn mikroqarz", Locale::Ru).as_deref(), Some("Онлайн микрозайм"));
    }

    #[test]
    fn short_phrase_inside_long_text_is_rejected() {
        assert_eq!(apply("Eng yaxshi garovsiz shartlar bilan", Locale::Ru), None);
        assert_eq!(apply("Mikrokreditbank", Locale::Ru), None);
    }

    #[test]
    fn translated_text_is_not_matched_again() {
        assert_eq!(apply("Образовательный кредит", Locale::Ru), None);
        assert_eq!(apply("Education loan", Locale::En), None);
    }
}
