//! The compile pipeline: raw Japanese lines → Hepburn romanization →
//! character filtering → Nihon-shiki substitution → append-only output
//! store. One line at a time, in source order, with no cross-line state.

mod filter;
mod lines;
mod nihonsiki;

pub use filter::filter_line;
pub use lines::RawLines;
pub use nihonsiki::{SubstitutionTable, TableError, DEFAULT_TABLE_JSON};

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::reading::{ReadingConverter, ReadingError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("substitution table error: {0}")]
    Table(#[from] TableError),

    #[error("reading conversion error: {0}")]
    Conversion(#[from] ReadingError),
}

/// Counters for one compile run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompileStats {
    pub lines_read: u64,
    pub lines_written: u64,
    pub lines_dropped: u64,
}

/// Join a line's token readings with single spaces, in token order.
/// Zero tokens yield the empty string.
pub fn romanize<C: ReadingConverter>(converter: &C, line: &str) -> Result<String, ReadingError> {
    let tokens = converter.convert(line)?;
    let readings: Vec<&str> = tokens.iter().map(|t| t.hepburn.as_str()).collect();
    Ok(readings.join(" "))
}

/// Stream the raw store through the pipeline, appending one newline-terminated
/// record per surviving line to the output store.
///
/// Lines whose filtered form is empty are dropped. Any error aborts the run;
/// records already appended stay in place (append semantics give no
/// rollback).
pub fn compile_corpus<C: ReadingConverter>(
    converter: &C,
    table: &SubstitutionTable,
    raw_path: &Path,
    out_path: &Path,
) -> Result<CompileStats, PipelineError> {
    let raw_lines = RawLines::open(raw_path)?;
    let out_file = OpenOptions::new().create(true).append(true).open(out_path)?;
    let mut out = BufWriter::new(out_file);

    let mut stats = CompileStats::default();
    for line in raw_lines {
        let line = line?;
        stats.lines_read += 1;

        let romaji = romanize(converter, &line)?;
        let filtered = filter_line(&romaji);
        if filtered.is_empty() {
            stats.lines_dropped += 1;
            debug!(line = stats.lines_read, "dropped empty line");
            continue;
        }

        let record = table.apply(&filtered);
        out.write_all(record.as_bytes())?;
        out.write_all(b"\n")?;
        stats.lines_written += 1;
    }
    out.flush()?;

    info!(
        read = stats.lines_read,
        written = stats.lines_written,
        dropped = stats.lines_dropped,
        "compile run finished"
    );
    Ok(stats)
}
