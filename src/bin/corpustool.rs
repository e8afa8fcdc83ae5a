use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use romaji_corpus::corpus::{compile_corpus, filter_line, romanize, SubstitutionTable};
use romaji_corpus::fetch::{fetch_corpus, WikipediaSource};
use romaji_corpus::reading::KanaConverter;
use romaji_corpus::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "corpustool", about = "Romanized Japanese corpus builder")]
struct Cli {
    /// Directory for the diagnostic log
    #[arg(long, default_value = "log")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch random articles into the raw corpus store
    Fetch {
        /// Path to the raw corpus store (appended to)
        #[arg(long, default_value = "data/raw.txt")]
        raw_file: PathBuf,
        /// Number of articles to fetch
        #[arg(short, long, default_value = "100")]
        count: usize,
        /// MediaWiki api.php endpoint (Japanese Wikipedia if omitted)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Compile the raw store into the romanized output store
    Compile {
        /// Path to the raw corpus store
        #[arg(long, default_value = "data/raw.txt")]
        raw_file: PathBuf,
        /// Path to the output store (appended to)
        #[arg(long, default_value = "data/romaji.txt")]
        out_file: PathBuf,
        /// Substitution table JSON (embedded default if omitted)
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Show each pipeline stage for one line of text
    Explain {
        /// Raw Japanese text
        text: String,
        /// Substitution table JSON (embedded default if omitted)
        #[arg(long)]
        table: Option<PathBuf>,
    },
}

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            tracing::error!(error = %e, "aborting");
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn load_table(path: Option<&Path>) -> SubstitutionTable {
    match path {
        Some(p) => die!(SubstitutionTable::load(p), "Error loading table: {}"),
        None => SubstitutionTable::default_table(),
    }
}

fn main() {
    let cli = Cli::parse();
    let _guard = die!(init_tracing(&cli.log_dir), "Error initializing log: {}");

    match cli.command {
        Command::Fetch {
            raw_file,
            count,
            endpoint,
        } => {
            let source = match endpoint {
                Some(url) => WikipediaSource::with_endpoint(&url),
                None => WikipediaSource::new(),
            };
            let stats = die!(
                fetch_corpus(&source, count, &raw_file),
                "Error fetching articles: {}"
            );
            println!(
                "{} articles written, {} skipped",
                stats.articles_written, stats.articles_skipped
            );
        }

        Command::Compile {
            raw_file,
            out_file,
            table,
        } => {
            let table = load_table(table.as_deref());
            let converter = KanaConverter::new();
            let stats = die!(
                compile_corpus(&converter, &table, &raw_file, &out_file),
                "Error compiling corpus: {}"
            );
            println!(
                "{} lines written, {} dropped ({} read)",
                stats.lines_written, stats.lines_dropped, stats.lines_read
            );
        }

        Command::Explain { text, table } => {
            let table = load_table(table.as_deref());
            let converter = KanaConverter::new();
            let romaji = die!(romanize(&converter, &text), "Error converting text: {}");
            let filtered = filter_line(&romaji);
            println!("hepburn:   {romaji}");
            println!("filtered:  {filtered}");
            if filtered.is_empty() {
                println!("(line would be dropped)");
            } else {
                println!("nihonsiki: {}", table.apply(&filtered));
            }
        }
    }
}
