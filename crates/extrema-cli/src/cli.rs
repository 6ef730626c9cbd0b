//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ClassifyArgs, ExtremumArgs, RangesArgs, RootArgs};

/// Extrema - numerical differentiation, root-finding and extremum search
#[derive(Parser)]
#[command(name = "extrema")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan starting guesses and report the ranges that converge to an expected extremum
    Ranges(RangesArgs),

    /// Find a root with Newton's method from one starting guess
    Root(RootArgs),

    /// Classify a critical point as minimum, maximum or inflection
    Classify(ClassifyArgs),

    /// Search for an extremum of a given kind from one starting guess
    Extremum(ExtremumArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
