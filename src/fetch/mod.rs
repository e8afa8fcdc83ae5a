//! Acquisition of raw Japanese prose: random encyclopedia articles are
//! fetched over the MediaWiki API, scrubbed, and appended to the raw
//! corpus store for the compile pipeline to consume.

mod wikipedia;

pub use wikipedia::WikipediaSource;

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API response error: {0}")]
    Api(String),
}

/// Counters for one fetch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchStats {
    pub articles_written: u64,
    pub articles_skipped: u64,
}

fn ascii_letters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[a-zA-Z]").expect("letter pattern must be valid"))
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank-line pattern must be valid"))
}

/// Prepare fetched prose for the raw store: ASCII letters are stripped
/// (stray Latin degrades the romanized corpus), blank lines collapse, and
/// the text gains a trailing newline.
pub fn scrub_prose(text: &str) -> String {
    let stripped = ascii_letters().replace_all(text, "");
    let mut with_newline = stripped.into_owned();
    with_newline.push('\n');
    blank_lines().replace_all(&with_newline, "\n").into_owned()
}

/// Fetch `count` random articles and append their scrubbed prose to the raw
/// store. Articles that resolve to no text (missing pages, unresolvable
/// disambiguation, failed requests) are skipped with a log record; only a
/// failure to obtain the title batch or to write the store aborts the run.
pub fn fetch_corpus(
    source: &WikipediaSource,
    count: usize,
    raw_path: &Path,
) -> Result<FetchStats, FetchError> {
    info!(count, "fetch run started");
    let titles = source.random_titles(count)?;

    let mut texts = Vec::with_capacity(titles.len());
    let mut stats = FetchStats::default();
    for title in titles {
        debug!(%title, "fetching article");
        match source.article_text(&title) {
            Ok(Some(text)) if !text.trim().is_empty() => {
                texts.push(scrub_prose(&text));
                stats.articles_written += 1;
            }
            Ok(_) => {
                debug!(%title, "article yielded no text");
                stats.articles_skipped += 1;
            }
            Err(e) => {
                warn!(%title, error = %e, "article fetch failed");
                stats.articles_skipped += 1;
            }
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(raw_path)?;
    let mut out = BufWriter::new(file);
    for text in &texts {
        out.write_all(text.as_bytes())?;
    }
    out.flush()?;

    info!(
        written = stats.articles_written,
        skipped = stats.articles_skipped,
        "fetch run finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_strips_ascii_letters() {
        assert_eq!(scrub_prose("日本語abcの文XYZ"), "日本語の文\n");
    }

    #[test]
    fn scrub_collapses_blank_lines() {
        assert_eq!(scrub_prose("一行目\n\n\n二行目"), "一行目\n二行目\n");
        assert_eq!(scrub_prose("一行目\n  \n二行目"), "一行目\n二行目\n");
    }

    #[test]
    fn scrub_terminates_with_newline() {
        assert_eq!(scrub_prose("文"), "文\n");
        assert_eq!(scrub_prose("文\n"), "文\n");
    }
}
