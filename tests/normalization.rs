//! Properties of the deterministic text rules.

#![allow(clippy::unwrap_used)]

use partner_hub::domain::services::plural::{DurationUnit, PluralCategory};
use partner_hub::domain::services::{BankNameNormalizer, rules, to_cyrillic};
use partner_hub::domain::value_objects::Locale;
use proptest::prelude::*;

const KNOWN: &[&str] = &[
    "kapitalbank atb",
    "Ipak yo`li banki",
    "\"HAMKORBANK\" ATB",
    "o'zsanoatqurilishbank",
    "Infinbank",
    "tbc",
    "Asaka bank AJ",
];

fn bank_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(KNOWN).prop_map(str::to_string),
        "[a-zA-Z]{1,10}( [a-zA-Z]{1,10}){0,3}",
        "[a-z]{2,8}(bank|banki)( atb| aj)?",
    ]
}

proptest! {
    #[test]
    fn bank_normalization_is_idempotent(name in bank_name()) {
        let banks = BankNameNormalizer::new();
        let once = banks.normalize(&name);
        prop_assert_eq!(banks.normalize(&once), once.clone());
    }

    #[test]
    fn bank_normalization_ignores_case_and_spacing(name in bank_name()) {
        let banks = BankNameNormalizer::new();
        let noisy = format!("  {}  ", name.to_uppercase().replace(' ', "   "));
        prop_assert_eq!(banks.normalize(&noisy), banks.normalize(&name));
    }

    #[test]
    fn plural_category_repeats_every_hundred(n in 0u32..100_000) {
        prop_assert_eq!(
            PluralCategory::of(&n.to_string()),
            PluralCategory::of(&(n + 100).to_string())
        );
    }

    #[test]
    fn russian_years_agree_with_number(n in 1u32..1_000) {
        let number = n.to_string();
        let expected = match (n % 10, n % 100) {
            (_, 11..=14) => "лет",
            (1, _) => "год",
            (2..=4, _) => "года",
            _ => "лет",
        };
        prop_assert_eq!(DurationUnit::Year.russian(&number), expected);
        prop_assert_eq!(
            rules::apply(&format!("{n} yil"), Locale::Ru),
            Some(format!("{n} {expected}"))
        );
    }

    #[test]
    fn percent_ranges_render_in_both_locales(a in 0u32..100, b in 0u32..100) {
        let source = format!("{a}% dan {b}% gacha");
        prop_assert_eq!(rules::apply(&source, Locale::Ru), Some(format!("от {a}% до {b}%")));
        prop_assert_eq!(rules::apply(&source, Locale::En), Some(format!("from {a}% to {b}%")));
    }

    #[test]
    fn transliteration_leaves_no_latin_letters(text in "[a-zA-Z' ]{0,40}") {
        let cyrillic = to_cyrillic(&text);
        prop_assert!(!cyrillic.chars().any(|c| c.is_ascii_alphabetic()), "{cyrillic}");
    }

    #[test]
    fn transliterated_text_is_a_fixed_point(text in "[a-zA-Z ]{0,40}") {
        let cyrillic = to_cyrillic(&text);
        prop_assert_eq!(to_cyrillic(&cyrillic), cyrillic.clone());
    }
}

#[test]
fn known_aliases_share_one_canonical_name() {
    let banks = BankNameNormalizer::new();
    for alias in ["Milliy bank", "NBU", "O'zmilliybank", "uzbekistan national bank"] {
        assert_eq!(banks.normalize(alias), "O'zmilliybank", "{alias}");
        assert!(banks.is_known(alias));
    }
}

#[test]
fn payment_apps_are_not_banks() {
    let banks = BankNameNormalizer::new();
    for name in ["Payme", "CLICK", "Uzcard", "  "] {
        assert!(!banks.is_bank(name), "{name}");
    }
    assert!(banks.is_bank("Kapitalbank"));
    assert!(banks.is_bank("Some New Bank"));
}
