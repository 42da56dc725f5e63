//! # Bank Names
//!
//! Canonicalization of scraped bank names.
//!
//! Names are reduced to a token list: apostrophes folded, quotes removed,
//! hyphens split, `bank`/`banki` suffixes peeled off glued words and legal
//! form abbreviations (`ATB`, `AJ`, `JSC`, ...) dropped. The concatenated
//! tokens form a compact lookup key into a closed table of known banks.
//! Unknown names fall back to title-casing the tokens.
//!
//! Both paths are fixed points: normalizing an already normalized name
//! returns it unchanged.
//!
//! # Examples
//!
//! ```
//! use partner_hub::domain::services::bank_names::BankNameNormalizer;
//!
//! let banks = BankNameNormalizer::new();
//! assert_eq!(banks.normalize("  KAPITALBANK atb "), "Kapitalbank");
//! assert_eq!(banks.normalize("Infinbank"), "Infin Bank");
//! assert!(!banks.is_bank("Payme"));
//! ```

use crate::domain::services::text::{fold_apostrophes, title_case};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Known banks: canonical display name followed by accepted aliases.
const KNOWN_BANKS: &[(&str, &[&str])] = &[
    ("Agrobank", &["agro bank", "агробанк"]),
    ("Aloqabank", &["aloqa bank", "алокабанк"]),
    ("Anorbank", &["anor bank", "анорбанк"]),
    ("Apex Bank", &["apexbank"]),
    ("Asakabank", &["asaka bank", "асакабанк"]),
    ("Asia Alliance Bank", &["aab", "asia alliance"]),
    ("Davr Bank", &["davrbank"]),
    ("Garant Bank", &["garantbank"]),
    ("Hamkorbank", &["hamkor bank", "хамкорбанк"]),
    ("Hayot Bank", &["hayotbank"]),
    ("Hi-Tech Bank", &["hitech bank"]),
    ("Ipak Yo'li Banki", &["ipak yuli", "ipak yo'li", "ipakyulibank", "ипак йули"]),
    ("Ipoteka Bank", &["ipotekabank", "ipoteka", "ипотека банк"]),
    ("Kapitalbank", &["kapital bank", "капиталбанк"]),
    ("KDB Bank Uzbekistan", &["kdb bank", "kdb"]),
    ("Madad Invest Bank", &["madad invest"]),
    ("Mikrokreditbank", &["mikrokredit bank", "mkbank", "микрокредитбанк"]),
    ("Octobank", &["octo bank", "ravnaqbank octobank"]),
    ("Orient Finans Bank", &["orient finans", "ofb"]),
    ("O'zmilliybank", &["milliy bank", "nbu", "uzbekistan national bank", "национальный банк"]),
    ("Poytaxt Bank", &["poytaxtbank"]),
    ("Ravnaq Bank", &["ravnaqbank"]),
    ("SQB", &["sanoatqurilishbank", "uzpromstroybank", "o'zsanoatqurilishbank"]),
    ("Smartbank", &["smart bank"]),
    ("TBC Bank", &["tbcbank", "tbc"]),
    ("Tenge Bank", &["tengebank"]),
    ("Trastbank", &["trast bank", "трастбанк"]),
    ("Turkiston Bank", &["turkistonbank"]),
    ("Turonbank", &["turon bank", "туронбанк"]),
    ("Universal Bank", &["universalbank"]),
    ("Uzum Bank", &["uzumbank"]),
    ("Xalq Banki", &["xalqbanki", "xalq bank", "халк банки"]),
    ("Ziraat Bank Uzbekistan", &["ziraat bank", "ziraat"]),
];

/// Payment apps and card schemes that appear in bank listings.
const NON_BANKS: &[&str] = &[
    "click", "payme", "paynet", "apelsin", "oson", "upay", "beepul", "paylov", "alifmobi",
    "humans", "uzcard", "humo",
];

/// Legal form abbreviations dropped from names.
const LEGAL_FORMS: &[&str] = &[
    "atb", "aj", "atib", "akb", "datb", "ajb", "jsc", "ojsc", "pjsc", "ao", "атб", "ао", "акб",
];

const QUOTES: [char; 5] = ['"', '\u{ab}', '\u{bb}', '\u{201c}', '\u{201d}'];

static CANONICAL_TABLE: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for (canonical, aliases) in KNOWN_BANKS {
        table.insert(compact_key(canonical), *canonical);
        for alias in *aliases {
            table.entry(compact_key(alias)).or_insert(*canonical);
        }
    }
    table
});

/// Splits `bank`/`banki` off the end of a glued token, recursively.
fn peel_bank_suffix(token: &str, out: &mut Vec<String>) {
    for suffix in ["banki", "bank"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if !stem.is_empty() {
                peel_bank_suffix(stem, out);
                out.push(suffix.to_string());
                return;
            }
        }
    }
    out.push(token.to_string());
}

/// Lower-cased name tokens with bank suffixes split and legal forms removed.
fn tokens(name: &str) -> Vec<String> {
    let folded: String = fold_apostrophes(name)
        .chars()
        .filter(|c| !QUOTES.contains(c))
        .map(|c| if c == '-' || c == '\u{2013}' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase();

    let mut out = Vec::new();
    for raw in folded.split_whitespace() {
        let token = raw.trim_matches(|c: char| c == ',' || c == '.');
        if token.is_empty() {
            continue;
        }
        peel_bank_suffix(token, &mut out);
    }
    out.retain(|t| !LEGAL_FORMS.contains(&t.as_str()));
    out
}

fn compact_key(name: &str) -> String {
    tokens(name)
        .concat()
        .chars()
        .filter(|c| *c != '\'' && *c != '.')
        .collect()
}

fn display_token(token: &str) -> String {
    match token {
        "bank" => "Bank".to_string(),
        "banki" => "Banki".to_string(),
        other => title_case(other),
    }
}

/// Canonicalizes bank names and tells banks from payment apps.
///
/// The lookup table is built once per process and shared by every
/// normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BankNameNormalizer;

impl BankNameNormalizer {
    /// Creates a normalizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the canonical display name for `name`.
    ///
    /// Known banks map to their table entry; unknown names are rebuilt from
    /// title-cased tokens. Empty input yields an empty string.
    #[must_use]
    pub fn normalize(&self, name: &str) -> String {
        let key = compact_key(name);
        if let Some(canonical) = CANONICAL_TABLE.get(&key) {
            return (*canonical).to_string();
        }

        tokens(name)
            .iter()
            .map(|t| display_token(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns true if `name` is in the known-bank table.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        CANONICAL_TABLE.contains_key(&compact_key(name))
    }

    /// Returns false for payment apps and card schemes, and for blank names.
    #[must_use]
    pub fn is_bank(&self, name: &str) -> bool {
        let tokens = tokens(name);
        if tokens.is_empty() {
            return false;
        }
        let key = compact_key(name);
        !NON_BANKS
            .iter()
            .any(|deny| key == *deny || tokens.iter().any(|t| t == deny))
    }
}
