//! Extrema CLI - Command-line interface for numerical extremum analysis.
//!
//! # Usage
//!
//! ```bash
//! # Which starting guesses in [-20, 20] converge to the maximum at 1?
//! extrema ranges --expr "-(x - 1)^2" --expected 1 --kind maximum
//!
//! # Newton's method from a single guess
//! extrema root --expr "x^3 + 4096" --guess 5
//!
//! # Classify a critical point
//! extrema classify --expr "x^4" --at 0
//!
//! # Search for an extremum from a single guess
//! extrema extremum --expr "x^4 - x^2" --kind minimum --guess 0.2
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod expr;
mod output;
mod settings;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Ranges(args) => commands::ranges::execute(args, format)?,
        Commands::Root(args) => commands::root::execute(args, format)?,
        Commands::Classify(args) => commands::classify::execute(args, format)?,
        Commands::Extremum(args) => commands::extremum::execute(args, format)?,
    }

    Ok(())
}
