use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Default Hepburn → Nihon-shiki rules. Digraph spellings are listed before
/// the single spellings they share letters with; the file's order is the
/// order of application.
pub const DEFAULT_TABLE_JSON: &str = include_str!("default_table.json");

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Pattern → replacement pairs in document order.
///
/// A derived map type would lose the file's declared order, which is
/// semantically significant: substitutions compose sequentially, so the
/// visitor collects entries into a `Vec` exactly as they appear.
struct OrderedRules(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = OrderedRules;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of pattern → replacement strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut rules = Vec::new();
                while let Some((pattern, replacement)) = map.next_entry::<String, String>()? {
                    rules.push((pattern, replacement));
                }
                Ok(OrderedRules(rules))
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

/// Ordered Hepburn → Nihon-shiki substitution rules, compiled once at load
/// and immutable for the rest of the run.
#[derive(Debug)]
pub struct SubstitutionTable {
    rules: Vec<(Regex, String)>,
}

impl SubstitutionTable {
    /// Parse a JSON object of pattern → replacement strings. Patterns are
    /// full regexes; replacements may use `$`-group expansion.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let OrderedRules(raw) = serde_json::from_str(json).map_err(|e| TableError::Json(e.to_string()))?;

        let mut rules = Vec::with_capacity(raw.len());
        for (pattern, replacement) in raw {
            let regex = Regex::new(&pattern).map_err(|source| TableError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            rules.push((regex, replacement));
        }
        Ok(Self { rules })
    }

    /// Load a table file. Any failure here is fatal to a run and must occur
    /// before the first raw line is read.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The embedded default rule set.
    pub fn default_table() -> Self {
        Self::from_json(DEFAULT_TABLE_JSON).expect("embedded substitution table must be valid")
    }

    /// A table with no rules; `apply` is then the identity.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in table order, each global substitution running on
    /// the previous rule's output. Earlier rewrites feed later rules;
    /// reordering the table changes the result.
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (pattern, replacement) in &self.rules {
            text = pattern.replace_all(&text, replacement.as_str()).into_owned();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_rewrites_hepburn_spellings() {
        let table = SubstitutionTable::default_table();
        assert_eq!(table.apply("shi tsu fu chi ji"), "si tu hu ti zi");
        assert_eq!(table.apply("sha shu sho"), "sya syu syo");
        assert_eq!(table.apply("matcha"), "mattya");
    }

    #[test]
    fn rules_compose_sequentially_in_table_order() {
        let table = SubstitutionTable::from_json(r#"{"a": "b", "b": "c"}"#).unwrap();
        // The first rewrite feeds the second; a parallel pass would stop at "b".
        assert_eq!(table.apply("a"), "c");

        let reversed = SubstitutionTable::from_json(r#"{"b": "c", "a": "b"}"#).unwrap();
        assert_eq!(reversed.apply("a"), "b");
    }

    #[test]
    fn patterns_are_regexes() {
        let table = SubstitutionTable::from_json(r#"{"o+": "o", "(k)u": "$1"}"#).unwrap();
        assert_eq!(table.apply("ookii kuma"), "okii kma");
    }

    #[test]
    fn empty_table_is_identity() {
        let table = SubstitutionTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.apply("kon nichi wa"), "kon nichi wa");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SubstitutionTable::from_json("not json").unwrap_err();
        assert!(matches!(err, TableError::Json(_)));
        let err = SubstitutionTable::from_json(r#"["shi", "si"]"#).unwrap_err();
        assert!(matches!(err, TableError::Json(_)));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = SubstitutionTable::from_json(r#"{"[unclosed": "x"}"#).unwrap_err();
        match err {
            TableError::Pattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
            other => panic!("expected Pattern error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SubstitutionTable::load(Path::new("/nonexistent/table.json")).unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }
}
