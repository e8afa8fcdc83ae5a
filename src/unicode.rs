//! Character-level Unicode classification for Japanese text.

pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// The prolonged sound mark ー (U+30FC, technically katakana) appears in
/// both scripts ("らーめん") and is handled separately from the kana blocks.
pub fn is_prolonged_mark(c: char) -> bool {
    c == 'ー'
}

/// Check whether a character belongs to a span a kana reading can be derived
/// from: hiragana, katakana, or the prolonged sound mark.
pub fn is_readable_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// Convert a katakana string to hiragana.
/// Characters outside the syllabic katakana range (ー, ASCII, etc.) are
/// passed through unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("キョウハ"), "きょうは");
        assert_eq!(katakana_to_hiragana("ラーメン"), "らーめん");
        assert_eq!(katakana_to_hiragana(""), "");
        assert_eq!(katakana_to_hiragana("abc"), "abc");
        assert_eq!(katakana_to_hiragana("ひらがな"), "ひらがな");
    }

    #[test]
    fn test_char_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(is_katakana('ー'));
        assert!(!is_katakana('あ'));
        assert!(is_kanji('漢'));
        assert!(!is_kanji('あ'));
        assert!(is_prolonged_mark('ー'));
        assert!(!is_prolonged_mark('-'));
        assert!(is_readable_kana('ん'));
        assert!(is_readable_kana('ン'));
        assert!(!is_readable_kana('漢'));
    }
}
