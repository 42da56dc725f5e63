//! # Word Dictionary
//!
//! Word-by-word fallback for text that no structural rule or known phrase
//! fully covers. Unknown words pass through unchanged.

use crate::domain::services::text::{capitalize_first, starts_uppercase};
use crate::domain::value_objects::Locale;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Uzbek word, Russian, English. Keys are lower case with folded apostrophes.
const WORDS: &[(&str, &str, &str)] = &[
    ("kredit", "кредит", "loan"),
    ("krediti", "кредит", "loan"),
    ("kreditlar", "кредиты", "loans"),
    ("qarz", "заём", "loan"),
    ("mikroqarz", "микрозайм", "microloan"),
    ("omonat", "вклад", "deposit"),
    ("omonati", "вклад", "deposit"),
    ("omonatlar", "вклады", "deposits"),
    ("ipoteka", "ипотека", "mortgage"),
    ("avtokredit", "автокредит", "car loan"),
    ("yillik", "годовых", "per annum"),
    ("oylik", "ежемесячный", "monthly"),
    ("kunlik", "ежедневный", "daily"),
    ("foiz", "процент", "percent"),
    ("foizlar", "проценты", "interest"),
    ("foizli", "процентный", "interest-bearing"),
    ("stavka", "ставка", "rate"),
    ("muddat", "срок", "term"),
    ("muddati", "срок", "term"),
    ("muddatli", "срочный", "fixed-term"),
    ("muddatsiz", "бессрочный", "perpetual"),
    ("summa", "сумма", "amount"),
    ("summasi", "сумма", "amount"),
    ("miqdori", "размер", "amount"),
    ("onlayn", "онлайн", "online"),
    ("oflayn", "офлайн", "offline"),
    ("karta", "карта", "card"),
    ("kartasi", "карта", "card"),
    ("kartaga", "на карту", "to card"),
    ("mobil", "мобильное", "mobile"),
    ("ilova", "приложение", "app"),
    ("ilovasi", "приложение", "app"),
    ("orqali", "через", "via"),
    ("va", "и", "and"),
    ("yoki", "или", "or"),
    ("bilan", "с", "with"),
    ("uchun", "для", "for"),
    ("garov", "залог", "collateral"),
    ("garovi", "залог", "collateral"),
    ("garovsiz", "без залога", "without collateral"),
    ("kafil", "поручитель", "guarantor"),
    ("kafillik", "поручительство", "guarantee"),
    ("sug'urta", "страхование", "insurance"),
    ("sug'urtasi", "страхование", "insurance"),
    ("mln", "млн", "mln"),
    ("mlrd", "млрд", "bln"),
    ("ming", "тыс.", "thousand"),
    ("bank", "банк", "bank"),
    ("banki", "банк", "bank"),
    ("filial", "филиал", "branch"),
    ("filiali", "филиал", "branch"),
    ("filialida", "в филиале", "at a branch"),
    ("filiallarda", "в филиалах", "at branches"),
    ("ofis", "офис", "office"),
    ("ariza", "заявка", "application"),
    ("rasmiylashtirish", "оформление", "application"),
    ("to'lov", "платёж", "payment"),
    ("to'lovi", "платёж", "payment"),
    ("to'lovlar", "платежи", "payments"),
    ("to'lanadi", "выплачиваются", "paid"),
    ("badal", "взнос", "contribution"),
    ("boshlang'ich", "первоначальный", "initial"),
    ("dastlabki", "первоначальный", "initial"),
    ("imtiyozli", "льготный", "preferential"),
    ("davr", "период", "period"),
    ("davri", "период", "period"),
    ("har", "каждый", "every"),
    ("oy", "месяц", "month"),
    ("yil", "год", "year"),
    ("kun", "день", "day"),
    ("oxirida", "в конце", "at the end"),
    ("boshida", "в начале", "at the start"),
    ("kapitalizatsiya", "капитализация", "capitalization"),
    ("naqd", "наличные", "cash"),
    ("pul", "деньги", "money"),
    ("valyuta", "валюта", "currency"),
    ("milliy", "национальная", "national"),
    ("dollar", "доллар", "dollar"),
    ("yevro", "евро", "euro"),
    ("avtomobil", "автомобиль", "car"),
    ("uy", "дом", "house"),
    ("uy-joy", "жильё", "housing"),
    ("ta'lim", "образование", "education"),
    ("iste'mol", "потребительский", "consumer"),
    ("shartlar", "условия", "terms"),
    ("shartlari", "условия", "terms"),
    ("hujjatlar", "документы", "documents"),
    ("pasport", "паспорт", "passport"),
    ("daromad", "доход", "income"),
    ("ma'lumotnoma", "справка", "certificate"),
    ("yangi", "новый", "new"),
    ("birlamchi", "первичный", "primary"),
    ("ikkilamchi", "вторичный", "secondary"),
    ("bozor", "рынок", "market"),
    ("minimal", "минимальный", "minimum"),
    ("maksimal", "максимальный", "maximum"),
    ("qo'shimcha", "дополнительный", "additional"),
    ("xizmat", "услуга", "service"),
    ("bepul", "бесплатно", "free"),
    ("komissiya", "комиссия", "fee"),
    ("komissiyasiz", "без комиссии", "no fee"),
    ("oldin", "до", "before"),
    ("keyin", "после", "after"),
];

static TABLE: LazyLock<HashMap<&'static str, (&'static str, &'static str)>> =
    LazyLock::new(|| WORDS.iter().map(|(uz, ru, en)| (*uz, (*ru, *en))).collect());

fn lookup(word: &str, locale: Locale) -> Option<String> {
    let (ru, en) = TABLE.get(word.to_lowercase().as_str())?;
    let translated = match locale {
        Locale::Ru => *ru,
        Locale::En => *en,
        Locale::Uz | Locale::Oz => return None,
    };
    Some(if starts_uppercase(word) {
        capitalize_first(translated)
    } else {
        translated.to_string()
    })
}

/// Translates a hyphen or en-dash compound segment by segment, keeping
/// each separator.
fn lookup_compound(word: &str, locale: Locale) -> Option<String> {
    let mut out = String::with_capacity(word.len());
    let mut segment = String::new();
    let mut translated_any = false;

    let mut flush = |segment: &mut String, out: &mut String| {
        match lookup(segment, locale) {
            Some(t) => {
                out.push_str(&t);
                translated_any = true;
            }
            None => out.push_str(segment),
        }
        segment.clear();
    };

    for c in word.chars() {
        if c == '-' || c == '\u{2013}' {
            flush(&mut segment, &mut out);
            out.push(c);
        } else {
            segment.push(c);
        }
    }
    flush(&mut segment, &mut out);

    translated_any.then_some(out)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-' || c == '\u{2013}'
}

/// Translates recognised words of `text` into `locale`.
///
/// Returns `None` when no word was recognised.
#[must_use]
pub fn apply(text: &str, locale: Locale) -> Option<String> {
    if !locale.is_externally_translated() {
        return None;
    }

    let mut applied = false;
    let words: Vec<String> = text
        .split(' ')
        .map(|token| {
            let start = token.find(is_word_char).unwrap_or(token.len());
            let end = token
                .char_indices()
                .rev()
                .find(|(_, c)| is_word_char(*c))
                .map_or(start, |(i, c)| i + c.len_utf8());
            let (Some(lead), Some(core), Some(trail)) =
                (token.get(..start), token.get(start..end), token.get(end..))
            else {
                return token.to_string();
            };

            let translated = lookup(core, locale).or_else(|| {
                core.contains(['-', '\u{2013}'])
                    .then(|| lookup_compound(core, locale))
                    .flatten()
            });
            match translated {
                Some(t) => {
                    applied = true;
                    format!("{lead}{t}{trail}")
                }
                None => token.to_string(),
            }
        })
        .collect();

    applied.then(|| words.join(" "))
}
