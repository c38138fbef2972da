//! cmus2tsv
//!
//! Dumps the track metadata cache of the cmus music player as TSV.
//!
//! # Exit status
//!
//! - `0` on success, on a corrupt cache (reported as `Corrupt: <path>`), and
//!   when standard output is closed early
//! - `1` if the cache cannot be opened
//! - `2` on a usage error

mod commands;
mod error;
mod output;

use clap::Parser;
use cmuscache_core::Config;
use error::CliError;
use output::OutputFormat;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Dump the cmus track metadata cache as tab-separated values.
#[derive(Parser)]
#[command(name = "cmus2tsv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the cache file, usually ~/.config/cmus/cache
    cachefile: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,

    /// Maximum number of records to print
    #[arg(short, long)]
    limit: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new().limit(cli.limit);
    let mut out = BufWriter::new(io::stdout().lock());
    let result = commands::dump::run(&cli.cachefile, cli.format, &config, &mut out);
    // Rows written before a failure still go out.
    let flushed = out.flush().map_err(CliError::from);

    match result.and_then(|summary| flushed.map(|()| summary)) {
        Ok(summary) => {
            debug!(rows = summary.rows, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.is_broken_pipe() {
                debug!("standard output closed");
            } else {
                eprintln!("{err}");
            }
            if let CliError::Corrupt { source, .. } = &err {
                debug!(error = %source, "cache is corrupt");
            }
            err.exit_code()
        }
    }
}

/// Logs go to standard error; standard output carries only rows.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
