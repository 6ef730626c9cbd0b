//! Root command implementation.
//!
//! Runs Newton's method on an expression from one starting guess.

use anyhow::Result;
use clap::Args;
use extrema_math::solvers::{roots_newton, NewtonConfig};
use extrema_math::DEFAULT_MAX_ITERATIONS;

use crate::cli::OutputFormat;
use crate::commands::{parse_expr, resolve_prec};
use crate::output::{print_key_values, KeyValue};

/// Arguments for the root command.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Function of x, e.g. "x^3 + 4096"
    #[arg(short, long, allow_hyphen_values = true)]
    pub expr: String,

    /// Starting guess
    #[arg(short, long, allow_hyphen_values = true)]
    pub guess: f64,

    /// Zero tolerance and derivative step
    #[arg(short, long, env = "EXTREMA_PREC")]
    pub prec: Option<f64>,

    /// Iteration budget
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iters: u32,
}

/// Execute the root command.
pub fn execute(args: RootArgs, format: OutputFormat) -> Result<()> {
    let expr = parse_expr(&args.expr)?;
    let prec = resolve_prec(args.prec)?;
    let config = NewtonConfig::new(prec, args.max_iters);

    let root = roots_newton(|x| expr.eval(x), args.guess, &config)?;

    let results = vec![
        KeyValue::new("Function", args.expr.as_str()),
        KeyValue::from_number("Guess", args.guess, 6),
        KeyValue::from_number("Root", root, 10),
        KeyValue::from_number("f(Root)", expr.eval(root), 3),
    ];

    print_key_values("Newton Root", &results, "Root", format)
}
