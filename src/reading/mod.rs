//! Phonetic reading conversion: Japanese text → Hepburn romanization.
//!
//! The pipeline consumes readings through the [`ReadingConverter`] trait;
//! [`KanaConverter`] is the built-in table-driven implementation covering
//! kana (including yōon digraphs, sokuon, and the prolonged sound mark).
//! Spans it cannot read pass through untouched as residue for the
//! character filter downstream.

mod config;
mod convert;

pub use config::{parse_reading_toml, ReadingTableError};
pub use convert::KanaConverter;

/// One converted span of input text.
///
/// `hepburn` is the only attribute the corpus pipeline consumes; `surface`
/// is kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingToken {
    pub surface: String,
    pub hepburn: String,
}

/// Failure raised by a reading converter for a span of text.
///
/// The built-in [`KanaConverter`] never fails (unreadable spans become
/// residue tokens); external converters may.
#[derive(Debug, thiserror::Error)]
#[error("reading conversion failed: {0}")]
pub struct ReadingError(pub String);

/// Converts a span of mixed-script Japanese text into an ordered sequence
/// of phonetic tokens, each carrying a Hepburn reading.
pub trait ReadingConverter {
    fn convert(&self, text: &str) -> Result<Vec<ReadingToken>, ReadingError>;
}
