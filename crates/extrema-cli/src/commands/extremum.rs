//! Extremum command implementation.
//!
//! Searches for one extremum of the requested kind, with Newton's method
//! from the given guess as the root-finding strategy.

use anyhow::Result;
use clap::Args;
use extrema_math::extremum::{find_extremum, ExtremumKind, SearchConfig};
use extrema_math::solvers::{newton_strategy, NewtonConfig};
use extrema_math::DEFAULT_MAX_ITERATIONS;

use crate::cli::OutputFormat;
use crate::commands::{parse_expr, resolve_prec};
use crate::output::{print_key_values, KeyValue};

/// Arguments for the extremum command.
#[derive(Args, Debug)]
pub struct ExtremumArgs {
    /// Function of x, e.g. "x^4 - x^2"
    #[arg(short, long, allow_hyphen_values = true)]
    pub expr: String,

    /// Kind of extremum (minimum, maximum, inflection)
    #[arg(short, long, default_value = "minimum")]
    pub kind: ExtremumKind,

    /// Starting guess for Newton's method
    #[arg(short, long, allow_hyphen_values = true)]
    pub guess: f64,

    /// Precision for every stage
    #[arg(short, long, env = "EXTREMA_PREC")]
    pub prec: Option<f64>,

    /// Search round budget
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iters: u32,

    /// Newton iteration budget
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub newton_max_iters: u32,
}

/// Execute the extremum command.
pub fn execute(args: ExtremumArgs, format: OutputFormat) -> Result<()> {
    let expr = parse_expr(&args.expr)?;
    let prec = resolve_prec(args.prec)?;

    let x = find_extremum(
        |x| expr.eval(x),
        args.kind,
        newton_strategy(args.guess, NewtonConfig::new(prec, args.newton_max_iters)),
        &SearchConfig::new(prec, args.max_iters),
    )?;

    let results = vec![
        KeyValue::new("Function", args.expr.as_str()),
        KeyValue::new("Kind", args.kind.as_str()),
        KeyValue::from_number("Guess", args.guess, 6),
        KeyValue::from_number("Location", x, 10),
        KeyValue::from_number("f(Location)", expr.eval(x), 10),
    ];

    print_key_values("Extremum", &results, "Location", format)
}
