use std::io::{BufWriter, Read as _, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use puzzle_data::{Converter, WordSearchResult};
use puzzle_query::WordSearchQuery;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // A missing .env file is the common case.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(e) = dotenv {
        tracing::debug!("no dotenv file loaded: {}", e);
    }

    let opts = Opts::parse();
    let mut stdout = BufWriter::new(std::io::stdout().lock());
    run(opts, &mut stdout)?;
    stdout.flush().context("Failed to flush stdout")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Inspect and re-encode word search API payloads, build request parameters
/// and try out the lenient timestamp parser.
#[derive(Debug, clap::Parser)]
struct Opts {
    /// Pretty-print JSON output.
    #[arg(long, global = true, env = "WORDSEARCH_PRETTY")]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Decode a payload and write it back out in canonical form.
    Decode {
        /// File containing the JSON payload. Reads stdin when omitted.
        file: Option<PathBuf>,

        /// The payload is a full API response (status, error, data, code).
        #[arg(short, long)]
        envelope: bool,
    },
    /// Decode a payload and summarise it, listing any inconsistencies.
    Check {
        /// File containing the JSON payload. Reads stdin when omitted.
        file: Option<PathBuf>,

        /// The payload is a full API response (status, error, data, code).
        #[arg(short, long)]
        envelope: bool,
    },
    /// Validate request parameters and print them.
    Query {
        /// Word to hide in the puzzle. Repeat for each word.
        #[arg(short, long = "word", required = true)]
        words: Vec<String>,

        /// Grid size.
        #[arg(short, long)]
        size: Option<u32>,

        /// Difficulty level.
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Print the JSON request body instead of query parameters.
        #[arg(long)]
        json: bool,
    },
    /// Parse a timestamp and print it as RFC 3339.
    Timestamp {
        text: String,

        /// Only accept a time of day; the date defaults to 2020-01-01.
        #[arg(short, long)]
        time_only: bool,
    },
}

fn run(opts: Opts, out: &mut impl Write) -> anyhow::Result<()> {
    let converter = if opts.pretty {
        Converter::pretty()
    } else {
        Converter::compact()
    };

    match opts.command {
        Command::Decode { file, envelope } => {
            let input = read_input(file.as_deref())?;
            let json = if envelope {
                let response = converter
                    .parse_response(&input)
                    .context("Failed to decode API response")?;
                // Surface API-level failures instead of echoing them back.
                let json = converter.serialize_response(&response)?;
                let data = response.into_data()?;
                tracing::debug!(words = data.words.len(), "decoded enveloped payload");
                json
            } else {
                let result = converter
                    .parse(&input)
                    .context("Failed to decode word search payload")?;
                converter.serialize(&result)?
            };
            writeln!(out, "{}", json)?;
        }
        Command::Check { file, envelope } => {
            let input = read_input(file.as_deref())?;
            let result = if envelope {
                converter
                    .parse_response(&input)
                    .context("Failed to decode API response")?
                    .into_data()?
            } else {
                converter
                    .parse(&input)
                    .context("Failed to decode word search payload")?
            };
            write_summary(&result, out)?;
        }
        Command::Query {
            words,
            size,
            difficulty,
            json,
        } => {
            let query = WordSearchQuery {
                words,
                size,
                difficulty,
            };
            query.validate()?;
            if json {
                let body = if opts.pretty {
                    serde_json::to_string_pretty(&query)?
                } else {
                    serde_json::to_string(&query)?
                };
                writeln!(out, "{}", body)?;
            } else {
                for (name, value) in query.to_query_params() {
                    writeln!(out, "{}={}", name, value)?;
                }
            }
        }
        Command::Timestamp { text, time_only } => {
            let parsed = if time_only {
                puzzle_data::parse_time_of_day(&text)
            } else {
                puzzle_data::parse_timestamp(&text)
            }
            .with_context(|| anyhow::anyhow!("Failed to parse {:?}", text))?;
            writeln!(out, "{}", parsed.to_rfc3339())?;
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| anyhow::anyhow!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn write_summary(result: &WordSearchResult, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}x{} grid, {} words, difficulty {:?}",
        result.grid.row_count(),
        result.grid.column_count(),
        result.words.len(),
        result.difficulty
    )?;
    for placed in &result.words {
        writeln!(
            out,
            "  {} at ({}, {}) {}",
            placed.word, placed.start.row, placed.start.col, placed.direction
        )?;
    }
    for (label, image) in [("image", &result.image), ("solution", &result.solution_image)] {
        if let Some(image) = image {
            writeln!(out, "{}: {} ({})", label, image.download_url, image.format)?;
        }
    }

    let issues = result.consistency_issues();
    if issues.is_empty() {
        writeln!(out, "consistent")?;
    } else {
        for issue in issues {
            tracing::warn!("{}", issue);
            writeln!(out, "issue: {}", issue)?;
        }
    }
    Ok(())
}
