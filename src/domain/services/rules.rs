//! # Structural Rules
//!
//! Regex rewrites for numeric phrases built with Uzbek postpositions:
//! percent bounds (`18% dan 24% gacha`), amounts with an optional scale
//! and currency (`500 mln so'mgacha`) and durations (`36 oygacha`,
//! `1 yildan 5 yilgacha`, `12-36 oygacha`, `3-5 yil`).
//!
//! Rules run in a fixed order (percent, amount, duration) and each one
//! rewrites every match in the text. They only match Latin-script Uzbek, so
//! running them over translated output is a no-op.

use crate::domain::services::plural::DurationUnit;
use crate::domain::value_objects::Locale;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const DECIMAL: &str = r"\d+(?:[.,]\d+)?";
const AMOUNT: &str = r"\d{1,3}(?:[ \x{a0}]\d{3})+|\d+(?:[.,]\d+)?";
const SCALE: &str = r"ming|mln|million|mlrd|milliard";
const CURRENCY: &str = r"so'?m";
const UNIT: &str = r"yil|oy|kun";
const HYPHEN: &str = r"[-\x{2013}]";

/// Number of rules in [`RULES`]; a pattern that fails to compile is
/// logged and dropped.
const RULE_COUNT: usize = 18;

type Render = fn(&Captures<'_>, Locale) -> String;

struct Rule {
    name: &'static str,
    pattern: Regex,
    render: Render,
}

fn rule(name: &'static str, pattern: &str, render: Render) -> Option<Rule> {
    match Regex::new(&format!("(?i){pattern}")) {
        Ok(pattern) => Some(Rule {
            name,
            pattern,
            render,
        }),
        Err(error) => {
            tracing::error!(rule = name, %error, "structural rule failed to compile");
            None
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    [
        // percent
        rule(
            "percent_range",
            &format!(r"(?P<a>{DECIMAL})\s*%?\s*dan\s+(?P<b>{DECIMAL})\s*%\s*gacha\b"),
            render_percent_range,
        ),
        rule(
            "percent_hyphen_range",
            &format!(
                r"(?P<a>{DECIMAL})\s*%?\s*{HYPHEN}\s*(?P<b>{DECIMAL})\s*%\s*(?:gacha|dan)\b"
            ),
            render_percent_hyphen_range,
        ),
        rule(
            "percent_from",
            &format!(r"(?P<a>{DECIMAL})\s*%\s*dan\b"),
            render_percent_from,
        ),
        rule(
            "percent_up_to",
            &format!(r"(?P<a>{DECIMAL})\s*%\s*gacha\b"),
            render_percent_up_to,
        ),
        // amount
        rule(
            "amount_range",
            &format!(
                r"(?P<a>{AMOUNT})\s*(?P<sa>{SCALE})?\s*(?:{CURRENCY})?\s*dan\s+(?P<b>{AMOUNT})\s*(?P<sb>{SCALE})?\s*(?:{CURRENCY})\s*gacha\b"
            ),
            render_amount_range,
        ),
        rule(
            "amount_from",
            &format!(r"(?P<a>{AMOUNT})\s*(?P<sa>{SCALE})?\s*(?:{CURRENCY})\s*dan\b"),
            render_amount_from,
        ),
        rule(
            "amount_up_to",
            &format!(r"(?P<a>{AMOUNT})\s*(?P<sa>{SCALE})?\s*(?:{CURRENCY})\s*gacha\b"),
            render_amount_up_to,
        ),
        rule(
            "scaled_from",
            &format!(r"(?P<a>{AMOUNT})\s*(?P<sa>{SCALE})\s*dan\b"),
            render_scaled_from,
        ),
        rule(
            "scaled_up_to",
            &format!(r"(?P<a>{AMOUNT})\s*(?P<sa>{SCALE})\s*gacha\b"),
            render_scaled_up_to,
        ),
        rule(
            "amount_plain",
            &format!(r"(?P<a>{AMOUNT})\s*(?P<sa>{SCALE})?\s*(?:{CURRENCY})\b"),
            render_amount_plain,
        ),
        rule("currency_unit", &format!(r"\b(?:{CURRENCY})\b"), render_currency),
        // duration
        rule(
            "term_range",
            &format!(
                r"(?P<a>{DECIMAL})\s*(?P<ua>{UNIT})?\s*dan\s+(?P<b>{DECIMAL})\s*(?P<ub>{UNIT})\s*gacha\b"
            ),
            render_term_range,
        ),
        rule(
            "term_hyphen_bounded",
            &format!(
                r"(?P<a>{DECIMAL})\s*{HYPHEN}\s*(?P<b>{DECIMAL})\s*(?P<ub>{UNIT})\s*(?:gacha|dan)\b"
            ),
            render_term_range,
        ),
        rule(
            "term_up_to",
            &format!(r"(?P<a>{DECIMAL})\s*(?P<ua>{UNIT})\s*gacha\b"),
            render_term_up_to,
        ),
        rule(
            "term_from",
            &format!(r"(?P<a>{DECIMAL})\s*(?P<ua>{UNIT})\s*dan\b"),
            render_term_from,
        ),
        rule(
            "term_for",
            &format!(r"(?P<a>{DECIMAL})\s*(?P<ua>{UNIT})\s*ga\b"),
            render_term_for,
        ),
        rule(
            "term_hyphen_range",
            &format!(r"(?P<a>{DECIMAL})\s*{HYPHEN}\s*(?P<b>{DECIMAL})\s*(?P<ub>{UNIT})\b"),
            render_term_hyphen_range,
        ),
        rule(
            "term_plain",
            &format!(r"\b(?P<a>{DECIMAL})\s*(?P<ua>{UNIT})\b"),
            render_term_plain,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
});

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn number(caps: &Captures<'_>, name: &str) -> String {
    group(caps, name).replace('\u{a0}', " ")
}

fn scale_word(word: &str, locale: Locale) -> Option<&'static str> {
    let word = word.to_lowercase();
    let (ru, en) = match word.as_str() {
        "ming" => ("тыс.", "thousand"),
        "mln" | "million" => ("млн", "mln"),
        "mlrd" | "milliard" => ("млрд", "bln"),
        _ => return None,
    };
    Some(if locale == Locale::Ru { ru } else { en })
}

const fn currency_word(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "сум",
        _ => "UZS",
    }
}

fn amount(caps: &Captures<'_>, num: &str, scale: &str, locale: Locale) -> String {
    let mut out = number(caps, num);
    if let Some(word) = scale_word(group(caps, scale), locale) {
        out.push(' ');
        out.push_str(word);
    }
    out
}

fn unit(caps: &Captures<'_>, name: &str) -> Option<DurationUnit> {
    DurationUnit::from_uzbek(group(caps, name))
}

/// Duration after `от`/`до` (`до 3 лет`) or `from`/`up to`.
fn bounded_term(n: &str, unit: DurationUnit, locale: Locale) -> String {
    match locale {
        Locale::Ru => format!("{n} {}", unit.russian_genitive(n)),
        _ => format!("{n} {}", unit.english(n)),
    }
}

/// Plain duration (`3 года`, `3 years`).
fn plain_term(n: &str, unit: DurationUnit, locale: Locale) -> String {
    match locale {
        Locale::Ru => format!("{n} {}", unit.russian(n)),
        _ => format!("{n} {}", unit.english(n)),
    }
}

fn render_percent_range(caps: &Captures<'_>, locale: Locale) -> String {
    let (a, b) = (group(caps, "a"), group(caps, "b"));
    match locale {
        Locale::Ru => format!("от {a}% до {b}%"),
        _ => format!("from {a}% to {b}%"),
    }
}

fn render_percent_hyphen_range(caps: &Captures<'_>, locale: Locale) -> String {
    let (a, b) = (group(caps, "a"), group(caps, "b"));
    match locale {
        Locale::Ru => format!("от {a} до {b}%"),
        _ => format!("from {a} to {b}%"),
    }
}

fn render_percent_from(caps: &Captures<'_>, locale: Locale) -> String {
    let a = group(caps, "a");
    match locale {
        Locale::Ru => format!("от {a}%"),
        _ => format!("from {a}%"),
    }
}

fn render_percent_up_to(caps: &Captures<'_>, locale: Locale) -> String {
    let a = group(caps, "a");
    match locale {
        Locale::Ru => format!("до {a}%"),
        _ => format!("up to {a}%"),
    }
}

fn render_amount_range(caps: &Captures<'_>, locale: Locale) -> String {
    let a = amount(caps, "a", "sa", locale);
    let b = amount(caps, "b", "sb", locale);
    let currency = currency_word(locale);
    match locale {
        Locale::Ru => format!("от {a} до {b} {currency}"),
        _ => format!("from {a} to {b} {currency}"),
    }
}

fn render_amount_from(caps: &Captures<'_>, locale: Locale) -> String {
    let a = amount(caps, "a", "sa", locale);
    let currency = currency_word(locale);
    match locale {
        Locale::Ru => format!("от {a} {currency}"),
        _ => format!("from {a} {currency}"),
    }
}

fn render_amount_up_to(caps: &Captures<'_>, locale: Locale) -> String {
    let a = amount(caps, "a", "sa", locale);
    let currency = currency_word(locale);
    match locale {
        Locale::Ru => format!("до {a} {currency}"),
        _ => format!("up to {a} {currency}"),
    }
}

fn render_scaled_from(caps: &Captures<'_>, locale: Locale) -> String {
    let a = amount(caps, "a", "sa", locale);
    match locale {
        Locale::Ru => format!("от {a}"),
        _ => format!("from {a}"),
    }
}

fn render_scaled_up_to(caps: &Captures<'_>, locale: Locale) -> String {
    let a = amount(caps, "a", "sa", locale);
    match locale {
        Locale::Ru => format!("до {a}"),
        _ => format!("up to {a}"),
    }
}

fn render_amount_plain(caps: &Captures<'_>, locale: Locale) -> String {
    format!("{} {}", amount(caps, "a", "sa", locale), currency_word(locale))
}

fn render_currency(_caps: &Captures<'_>, locale: Locale) -> String {
    currency_word(locale).to_string()
}

fn render_term_range(caps: &Captures<'_>, locale: Locale) -> String {
    let (a, b) = (group(caps, "a"), group(caps, "b"));
    let Some(ub) = unit(caps, "ub") else {
        return caps.get(0).map_or(String::new(), |m| m.as_str().to_string());
    };
    let ua = unit(caps, "ua").unwrap_or(ub);

    let (from, to) = match locale {
        Locale::Ru => ("от", "до"),
        _ => ("from", "to"),
    };
    if ua == ub {
        format!("{from} {a} {to} {}", bounded_term(b, ub, locale))
    } else {
        format!(
            "{from} {} {to} {}",
            bounded_term(a, ua, locale),
            bounded_term(b, ub, locale)
        )
    }
}

fn render_bounded(caps: &Captures<'_>, locale: Locale, ru: &str, en: &str) -> String {
    let a = group(caps, "a");
    match unit(caps, "ua") {
        Some(u) => {
            let prefix = if locale == Locale::Ru { ru } else { en };
            format!("{prefix} {}", bounded_term(a, u, locale))
        }
        None => caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
    }
}

fn render_term_up_to(caps: &Captures<'_>, locale: Locale) -> String {
    render_bounded(caps, locale, "до", "up to")
}

fn render_term_from(caps: &Captures<'_>, locale: Locale) -> String {
    render_bounded(caps, locale, "от", "from")
}

fn render_term_for(caps: &Captures<'_>, locale: Locale) -> String {
    let a = group(caps, "a");
    match unit(caps, "ua") {
        Some(u) if locale == Locale::Ru => format!("на {}", plain_term(a, u, locale)),
        Some(u) => format!("for {}", plain_term(a, u, locale)),
        None => caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
    }
}

fn render_term_hyphen_range(caps: &Captures<'_>, locale: Locale) -> String {
    let (a, b) = (group(caps, "a"), group(caps, "b"));
    match unit(caps, "ub") {
        Some(u) => format!("{a}\u{2013}{}", plain_term(b, u, locale)),
        None => caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
    }
}

fn render_term_plain(caps: &Captures<'_>, locale: Locale) -> String {
    let a = group(caps, "a");
    match unit(caps, "ua") {
        Some(u) => plain_term(a, u, locale),
        None => caps.get(0).map_or(String::new(), |m| m.as_str().to_string()),
    }
}

/// Rewrites every structural phrase in `text` for `locale`.
///
/// Returns `None` when no rule matched. Only [`Locale::Ru`] and
/// [`Locale::En`] are rewritten; other locales always yield `None`.
#[must_use]
pub fn apply(text: &str, locale: Locale) -> Option<String> {
    if !locale.is_externally_translated() {
        return None;
    }

    let mut current = text.to_string();
    let mut applied = false;
    for rule in RULES.iter() {
        if !rule.pattern.is_match(&current) {
            continue;
        }
        tracing::trace!(rule = rule.name, %locale, "structural rule matched");
        current = rule
            .pattern
            .replace_all(&current, |caps: &Captures<'_>| (rule.render)(caps, locale))
            .into_owned();
        applied = true;
    }

    applied.then_some(current)
}
