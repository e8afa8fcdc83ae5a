use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// Lazy line iterator over the raw corpus store.
///
/// The file handle lives exactly as long as the iterator; dropping it (on
/// exhaustion or on an aborted run) releases the store. Lines are yielded
/// as read, without buffering the whole corpus.
pub struct RawLines {
    lines: Lines<BufReader<File>>,
}

impl RawLines {
    /// Open the raw store for reading. A missing or unreadable store is the
    /// caller's signal to abort the run.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for RawLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn yields_lines_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "一行目").unwrap();
        writeln!(file, "二行目").unwrap();
        file.flush().unwrap();

        let lines: Vec<String> = RawLines::open(file.path())
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["一行目", "二行目"]);
    }

    #[test]
    fn missing_store_fails_to_open() {
        assert!(RawLines::open(Path::new("/nonexistent/raw.txt")).is_err());
    }
}
