use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct ReadingConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadingTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("empty key in [mappings]")]
    EmptyKey,
    #[error("non-ASCII reading for key: {0}")]
    NonAsciiReading(String),
}

/// Parse TOML text into a sorted `BTreeMap<kana, hepburn>`.
///
/// Readings must be ASCII (the romanized alphabet); an empty reading is
/// allowed so a table can silence a character outright.
pub fn parse_reading_toml(toml_str: &str) -> Result<BTreeMap<String, String>, ReadingTableError> {
    let config: ReadingConfig =
        toml::from_str(toml_str).map_err(|e| ReadingTableError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(ReadingTableError::Empty);
    }

    for (key, value) in &config.mappings {
        if key.is_empty() {
            return Err(ReadingTableError::EmptyKey);
        }
        if !value.is_ascii() {
            return Err(ReadingTableError::NonAsciiReading(key.clone()));
        }
    }

    Ok(config.mappings)
}
