use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

/// Install the file-based JSON subscriber for a batch run.
///
/// The returned guard must live until process exit so buffered records are
/// flushed; a batch run is short, unlike a resident service where the guard
/// could be leaked.
pub fn init_tracing(log_dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "corpustool.jsonl");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("romaji_corpus=debug")),
        )
        .init();

    Ok(guard)
}
