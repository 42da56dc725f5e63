//! # Transliteration
//!
//! Latin-script Uzbek to Cyrillic-script Uzbek.
//!
//! Digraphs (`sh`, `ch`, `o'`, `g'`, `yo`, `yu`, `ya`, `ye`) are matched
//! before single letters. A word-initial `e` becomes `э`; an apostrophe
//! between two letters (tutuq belgisi) becomes `ъ`. Cyrillic, digits and punctuation
//! pass through unchanged, so transliterating already-Cyrillic text is a
//! no-op.
//!
//! # Examples
//!
//! ```
//! use partner_hub::domain::services::transliteration::to_cyrillic;
//!
//! assert_eq!(to_cyrillic("Ko'rsatilmagan"), "Кўрсатилмаган");
//! assert_eq!(to_cyrillic("Ipak yo'li"), "Ипак йўли");
//! ```

use crate::domain::services::text::fold_apostrophes;

fn single(c: char) -> Option<char> {
    let mapped = match c {
        'a' => 'а',
        'b' => 'б',
        'c' => 'ц',
        'd' => 'д',
        'e' => 'е',
        'f' => 'ф',
        'g' => 'г',
        'h' => 'ҳ',
        'i' => 'и',
        'j' => 'ж',
        'k' => 'к',
        'l' => 'л',
        'm' => 'м',
        'n' => 'н',
        'o' => 'о',
        'p' => 'п',
        'q' => 'қ',
        'r' => 'р',
        's' => 'с',
        't' => 'т',
        'u' => 'у',
        'v' => 'в',
        'w' => 'в',
        'x' => 'х',
        'y' => 'й',
        'z' => 'з',
        _ => return None,
    };
    Some(mapped)
}

fn digraph(first: char, second: char, third: Option<char>) -> Option<char> {
    match (first, second) {
        ('o', '\'') => Some('ў'),
        ('g', '\'') => Some('ғ'),
        ('s', 'h') => Some('ш'),
        ('c', 'h') => Some('ч'),
        // yo' is й + ў, not ё
        ('y', 'o') if third == Some('\'') => None,
        ('y', 'o') => Some('ё'),
        ('y', 'u') => Some('ю'),
        ('y', 'a') => Some('я'),
        ('y', 'e') => Some('е'),
        _ => None,
    }
}

fn push_cased(out: &mut String, mapped: char, upper: bool) {
    if upper {
        out.extend(mapped.to_uppercase());
    } else {
        out.push(mapped);
    }
}

/// Transliterates Latin-script Uzbek into Cyrillic-script Uzbek.
#[must_use]
pub fn to_cyrillic(text: &str) -> String {
    let chars: Vec<char> = fold_apostrophes(text).chars().collect();
    let mut out = String::with_capacity(text.len() * 2);
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        let lower = c.to_ascii_lowercase();
        let upper = c.is_ascii_uppercase();
        let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
        let word_start = prev.is_none_or(|p| !p.is_alphanumeric() && p != '\'');

        if let Some(&next) = chars.get(i + 1) {
            let third = chars.get(i + 2).copied();
            if let Some(mapped) = digraph(lower, next.to_ascii_lowercase(), third) {
                push_cased(&mut out, mapped, upper);
                i += 2;
                continue;
            }
        }

        if c == '\'' {
            let inside_word = prev.is_some_and(char::is_alphabetic)
                && chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
            out.push(if inside_word { 'ъ' } else { '\'' });
        } else if lower == 'e' && word_start {
            push_cased(&mut out, 'э', upper);
        } else if let Some(mapped) = single(lower) {
            push_cased(&mut out, mapped, upper);
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digraphs() {
        assert_eq!(to_cyrillic("Toshkent"), "Тошкент");
        assert_eq!(to_cyrillic("gacha"), "гача");
        assert_eq!(to_cyrillic("so'm"), "сўм");
        assert_eq!(to_cyrillic("jamg'arma"), "жамғарма");
        assert_eq!(to_cyrillic("yangi yutuq yo'q"), "янги ютуқ йўқ");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(to_cyrillic("SHARTLAR"), "ШАРТЛАР");
        assert_eq!(to_cyrillic("Shartlar"), "Шартлар");
        assert_eq!(to_cyrillic("O'zbekiston"), "Ўзбекистон");
    }

    #[test]
    fn tutuq_belgisi_and_initial_e() {
        assert_eq!(to_cyrillic("ta'lim"), "таълим");
        assert_eq!(to_cyrillic("elektron"), "электрон");
        assert_eq!(to_cyrillic("mablag' 'test'"), "маблағ 'тест'");
    }

    #[test]
    fn numbers_and_cyrillic_pass_through() {
        assert_eq!(to_cyrillic("18% dan 24% gacha"), "18% дан 24% гача");
        assert_eq!(to_cyrillic("от 18% до 24%"), "от 18% до 24%");
    }

    #[test]
    fn folds_apostrophe_variants_first() {
        assert_eq!(to_cyrillic("Ko\u{2018}rsatilmagan"), "Кўрсатилмаган");
    }
}
