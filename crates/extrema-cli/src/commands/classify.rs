//! Classify command implementation.

use anyhow::Result;
use clap::Args;
use extrema_math::extremum::{extremum_kind, ClassifierConfig};
use extrema_math::DEFAULT_MAX_ITERATIONS;

use crate::cli::OutputFormat;
use crate::commands::{parse_expr, resolve_prec};
use crate::output::{print_key_values, KeyValue};

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Function of x, e.g. "x^4"
    #[arg(short, long, allow_hyphen_values = true)]
    pub expr: String,

    /// Point to classify
    #[arg(short, long, allow_hyphen_values = true)]
    pub at: f64,

    /// Non-vanishing threshold and derivative step
    #[arg(short, long, env = "EXTREMA_PREC")]
    pub prec: Option<f64>,

    /// Highest derivative order examined
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iters: u32,

    /// Treat the expression as the n-th derivative of the function of interest
    #[arg(short, long, default_value_t = 0)]
    pub nth_derivative: u32,
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    let expr = parse_expr(&args.expr)?;
    let prec = resolve_prec(args.prec)?;
    let config = ClassifierConfig::new(prec, args.max_iters).with_nth_derivative(args.nth_derivative);

    let kind = extremum_kind(|x| expr.eval(x), args.at, &config)?;

    let results = vec![
        KeyValue::new("Function", args.expr.as_str()),
        KeyValue::from_number("Point", args.at, 6),
        KeyValue::new("Kind", kind.as_str()),
    ];

    print_key_values("Critical Point", &results, "Kind", format)
}
