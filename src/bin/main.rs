#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use sift::score::util::wrap_ranges;
use sift::{FieldPath, SearchEngine, SearchOptions, Searchable};

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid record on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

/// Search structured records read as JSON lines.
#[derive(Parser)]
#[command(name = "sift", version, about = "Approximate string-matching search over structured records")]
struct Cli {
    /// The query to search for
    #[arg(short, long)]
    query: String,
    /// Dotted field paths to search, comma separated (whole record when omitted)
    #[arg(short, long, value_delimiter = ',')]
    key: Vec<String>,
    /// Mark matched ranges of the displayed text with brackets
    #[arg(long)]
    highlight: bool,
    /// JSON-lines input file (stdin when omitted)
    input: Option<PathBuf>,
    #[command(flatten)]
    options: SearchOptions,
}

fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("sift: {err}");
            std::process::exit(2)
        }
    }
}

fn real_main() -> Result<i32, CliError> {
    let cli = Cli::parse();

    let records = read_records(cli.input.as_deref())?;
    debug!("loaded {} records", records.len());

    let mut engine = SearchEngine::new(cli.options.clone());
    if !cli.key.is_empty() {
        engine.set_keys(cli.key.iter().map(|k| FieldPath::parse(k)));
    }
    engine.set_source(records);

    let results = engine.search(&cli.query);
    let found = !results.is_empty();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        let display = if cli.highlight {
            wrap_ranges(
                &result.sort_key,
                &engine.highlight(&cli.query, &result.sort_key),
            )
        } else {
            result.sort_key.clone()
        };
        writeln!(out, "{:.1}\t{}\t{}", result.score, result.matched_field, display)?;
    }

    Ok(if found { 0 } else { 1 })
}

fn read_records(path: Option<&Path>) -> Result<Vec<Arc<dyn Searchable>>, CliError> {
    let reader: Box<dyn BufRead> = match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value =
            serde_json::from_str(&line).map_err(|source| CliError::Json { line: idx + 1, source })?;
        records.push(Arc::new(value) as Arc<dyn Searchable>);
    }
    Ok(records)
}
