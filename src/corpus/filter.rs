use std::sync::OnceLock;

use regex::Regex;

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z,.\s]").expect("charset pattern must be valid"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace pattern must be valid"))
}

/// Restrict a romanized line to the corpus alphabet: lowercase Latin
/// letters, comma, period, and whitespace. Runs of two or more whitespace
/// characters collapse to a single space, and the result is trimmed.
///
/// The converter may emit uppercase, Japanese punctuation, or
/// untransliterated residue; everything outside the alphabet is deleted,
/// not normalized. May return an empty string; callers drop such lines.
pub fn filter_line(romaji: &str) -> String {
    let stripped = disallowed().replace_all(romaji, "");
    whitespace_runs()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowed_alphabet() {
        assert_eq!(filter_line("kon nichi wa"), "kon nichi wa");
        assert_eq!(filter_line("desu, ne."), "desu, ne.");
    }

    #[test]
    fn strips_disallowed_chars() {
        assert_eq!(filter_line("Tōkyō-to 123"), "kyto");
        assert_eq!(filter_line("漢字 kanji"), "kanji");
        assert_eq!(filter_line("ABC"), "");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(filter_line("a   b\t\tc"), "a b c");
        // A single interior non-space whitespace char is left alone.
        assert_eq!(filter_line("a\tb"), "a\tb");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(filter_line("  aiueo  "), "aiueo");
        assert_eq!(filter_line(" \t "), "");
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(filter_line(""), "");
    }

    #[test]
    fn idempotent() {
        for s in ["kon nichi wa", "Tōkyō-to 123", "  a   b  ", "、。１２３"] {
            let once = filter_line(s);
            assert_eq!(filter_line(&once), once);
        }
    }
}
