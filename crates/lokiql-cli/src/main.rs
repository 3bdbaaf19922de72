//! `lokiql`: compile a serialized query description into a LokiJS query.
//!
//! Reads JSON from a file (or stdin) and prints the compiled query as JSON.

use clap::Parser;
use lokiql::{
    config::{ConfigError, EncoderConfig},
    encode::QueryEncoder,
    error::EncodeError,
    obs::{EncodeTraceEvent, EncodeTraceSink},
    query::SerializedQuery,
};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error as ThisError;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(
    name = "lokiql",
    version,
    about = "Compile serialized query descriptions into LokiJS queries"
)]
struct Cli {
    /// Encoder config (TOML).
    #[arg(long, value_name = "FILE", env = "LOKIQL_CONFIG")]
    config: Option<PathBuf>,

    /// Print encode trace events to stderr.
    #[arg(long)]
    trace: bool,

    /// Print single-line JSON.
    #[arg(long)]
    compact: bool,

    /// Serialized query (JSON). Reads stdin when omitted.
    input: Option<PathBuf>,
}

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid serialized query: {0}")]
    Decode(serde_json::Error),

    #[error("{}", .0.display_with_class())]
    Encode(#[from] EncodeError),

    #[error("failed to render compiled query: {0}")]
    Render(serde_json::Error),
}

///
/// StderrTraceSink
///

struct StderrTraceSink;

impl EncodeTraceSink for StderrTraceSink {
    fn on_event(&self, event: EncodeTraceEvent<'_>) {
        eprintln!("[lokiql] {event}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("lokiql: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = match &cli.config {
        Some(path) => EncoderConfig::from_toml_str(&read_file(path)?)?,
        None => EncoderConfig::default(),
    };
    let input = match &cli.input {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };

    let sink = StderrTraceSink;
    let mut encoder = QueryEncoder::new(config);
    if cli.trace {
        encoder = encoder.with_trace(&sink);
    }

    render(&encoder, &input, cli.compact)
}

/// Decode, encode and render one serialized query.
fn render(encoder: &QueryEncoder<'_>, input: &str, compact: bool) -> Result<String, CliError> {
    let query: SerializedQuery = serde_json::from_str(input).map_err(CliError::Decode)?;
    let compiled = encoder.encode(&query)?;

    let output = if compact {
        serde_json::to_string(&compiled)
    } else {
        serde_json::to_string_pretty(&compiled)
    };

    output.map_err(CliError::Render)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn read_stdin() -> Result<String, CliError> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|source| CliError::Read {
            path: "stdin".to_string(),
            source,
        })?;

    Ok(input)
}

///
/// TESTS
///
