use std::collections::BTreeMap;

use crate::unicode::{is_prolonged_mark, is_readable_kana, katakana_to_hiragana};

use super::config::{parse_reading_toml, ReadingTableError};
use super::{ReadingConverter, ReadingError, ReadingToken};

pub const DEFAULT_TOML: &str = include_str!("default_readings.toml");

/// Table-driven kana → Hepburn converter.
///
/// Input is segmented into spans: kana runs are transliterated, characters
/// with a direct table reading (、 and 。 in the default table) become their
/// own token, and everything else (kanji, digits, symbols) passes through
/// unchanged as residue.
pub struct KanaConverter {
    table: BTreeMap<String, String>,
    max_key_chars: usize,
}

enum SpanKind {
    Kana,
    Mapped,
    Residue,
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

impl KanaConverter {
    /// Build a converter from the embedded default table.
    pub fn new() -> Self {
        // The embedded TOML is validated by build.rs.
        let table = parse_reading_toml(DEFAULT_TOML).expect("embedded reading TOML must be valid");
        Self::from_table(table)
    }

    /// Build a converter from custom TOML with a `[mappings]` table.
    pub fn from_toml(toml_str: &str) -> Result<Self, ReadingTableError> {
        Ok(Self::from_table(parse_reading_toml(toml_str)?))
    }

    fn from_table(table: BTreeMap<String, String>) -> Self {
        let max_key_chars = table.keys().map(|k| k.chars().count()).max().unwrap_or(1);
        Self {
            table,
            max_key_chars,
        }
    }

    fn classify(&self, c: char) -> SpanKind {
        let mut buf = [0u8; 4];
        if is_readable_kana(c) {
            SpanKind::Kana
        } else if self.table.contains_key(c.encode_utf8(&mut buf) as &str) {
            SpanKind::Mapped
        } else {
            SpanKind::Residue
        }
    }

    /// Transliterate one kana run. Unknown kana inside the run pass through
    /// unchanged; the downstream character filter owns the final alphabet.
    fn romanize_kana(&self, span: &str) -> String {
        let folded = katakana_to_hiragana(span);
        let chars: Vec<char> = folded.chars().collect();
        let mut out = String::new();
        let mut pending_sokuon = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == 'っ' {
                if pending_sokuon {
                    out.push_str("tsu");
                }
                pending_sokuon = true;
                i += 1;
                continue;
            }

            if is_prolonged_mark(c) {
                if pending_sokuon {
                    out.push_str("tsu");
                    pending_sokuon = false;
                }
                // ー repeats the preceding vowel; with no vowel to extend it
                // is dropped.
                if let Some(v) = out.chars().last().filter(|ch| is_vowel(*ch)) {
                    out.push(v);
                }
                i += 1;
                continue;
            }

            // Longest-key-first probe so yōon digraphs win over single kana.
            let max = self.max_key_chars.min(chars.len() - i);
            let mut matched = false;
            for len in (1..=max).rev() {
                let key: String = chars[i..i + len].iter().collect();
                if let Some(reading) = self.table.get(&key) {
                    if pending_sokuon {
                        push_geminated(&mut out, reading);
                        pending_sokuon = false;
                    } else {
                        out.push_str(reading);
                    }
                    i += len;
                    matched = true;
                    break;
                }
            }

            if !matched {
                if pending_sokuon {
                    out.push_str("tsu");
                    pending_sokuon = false;
                }
                out.push(c);
                i += 1;
            }
        }

        // Trailing っ has nothing to geminate.
        if pending_sokuon {
            out.push_str("tsu");
        }

        out
    }
}

impl Default for KanaConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `reading` with its leading consonant doubled (Hepburn gemination:
/// っち doubles as "tchi", everything else repeats the first consonant).
fn push_geminated(out: &mut String, reading: &str) {
    match reading.chars().next() {
        Some(first) if first.is_ascii_alphabetic() && !is_vowel(first) => {
            if reading.starts_with("ch") {
                out.push('t');
            } else {
                out.push(first);
            }
            out.push_str(reading);
        }
        _ => {
            // っ before a vowel or punctuation reads as a literal tsu.
            out.push_str("tsu");
            out.push_str(reading);
        }
    }
}

impl ReadingConverter for KanaConverter {
    fn convert(&self, text: &str) -> Result<Vec<ReadingToken>, ReadingError> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match self.classify(chars[i]) {
                SpanKind::Kana => {
                    let start = i;
                    while i < chars.len() && matches!(self.classify(chars[i]), SpanKind::Kana) {
                        i += 1;
                    }
                    let surface: String = chars[start..i].iter().collect();
                    let hepburn = self.romanize_kana(&surface);
                    tokens.push(ReadingToken { surface, hepburn });
                }
                SpanKind::Mapped => {
                    let mut buf = [0u8; 4];
                    let key = chars[i].encode_utf8(&mut buf) as &str;
                    let hepburn = self.table[key].clone();
                    tokens.push(ReadingToken {
                        surface: key.to_string(),
                        hepburn,
                    });
                    i += 1;
                }
                SpanKind::Residue => {
                    let start = i;
                    while i < chars.len() && matches!(self.classify(chars[i]), SpanKind::Residue) {
                        i += 1;
                    }
                    let surface: String = chars[start..i].iter().collect();
                    tokens.push(ReadingToken {
                        hepburn: surface.clone(),
                        surface,
                    });
                }
            }
        }

        Ok(tokens)
    }
}
