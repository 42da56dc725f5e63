//! # Text Helpers
//!
//! Small string utilities shared by the normalization rules.

use std::ops::Range;

/// Apostrophe look-alikes found in scraped Uzbek text.
const APOSTROPHE_VARIANTS: [char; 6] = ['\u{2018}', '\u{2019}', '`', '\u{02BB}', '\u{02BC}', '\u{2032}'];

/// Marker meaning "value not specified", in folded lower case.
const NOT_SPECIFIED_MARKER: &str = "ko'rsatilmagan";

/// Replaces every apostrophe variant with ASCII `'`.
#[must_use]
pub fn fold_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| {
            if APOSTROPHE_VARIANTS.contains(&c) {
                '\''
            } else {
                c
            }
        })
        .collect()
}

/// Folds apostrophes, trims and collapses inner whitespace to single spaces.
#[must_use]
pub fn clean(text: &str) -> String {
    fold_apostrophes(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true if `text` is the "not specified" marker in any casing or
/// apostrophe variant.
#[must_use]
pub fn is_not_specified(text: &str) -> bool {
    let folded = clean(text).to_lowercase();
    folded == NOT_SPECIFIED_MARKER || folded.replace('\'', "") == "korsatilmagan"
}

/// Returns true if the first character is uppercase.
#[must_use]
pub fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Returns true if the text contains at least one Cyrillic letter.
#[must_use]
pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(is_cyrillic)
}

/// Returns true if the text contains at least one Latin letter.
#[must_use]
pub fn has_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Returns true if the text is written in Cyrillic only (digits and
/// punctuation allowed), i.e. it is already localized.
#[must_use]
pub fn is_cyrillic_text(text: &str) -> bool {
    has_cyrillic(text) && !has_latin(text)
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Finds the first case-insensitive occurrence of `needle` in `haystack`,
/// returning its byte range.
#[must_use]
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    for (start, _) in haystack.char_indices() {
        let Some(rest) = haystack.get(start..) else {
            continue;
        };
        let mut hay = rest.char_indices();
        let mut matched_end = None;
        let mut ok = true;

        for n in needle.chars() {
            match hay.next() {
                Some((offset, h)) if chars_eq_ignore_case(h, n) => {
                    matched_end = Some(start + offset + h.len_utf8());
                }
                _ => {
                    ok = false;
                    break;
                }
            }
        }

        if ok {
            if let Some(end) = matched_end {
                return Some(start..end);
            }
        }
    }
    None
}
