//! Ranges command implementation.
//!
//! Walks starting guesses across an interval, runs an extremum search from
//! each, and reports the contiguous ranges of guesses whose search lands on
//! the expected extremum. Useful for seeing how robust Newton's method is
//! for a given function.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use extrema_math::extremum::{find_extremum, ClassifierOverrides, ExtremumKind, SearchConfig};
use extrema_math::solvers::{newton_strategy, NewtonConfig};
use extrema_math::{MathResult, DEFAULT_MAX_ITERATIONS};

use crate::cli::OutputFormat;
use crate::commands::{parse_expr, resolve_prec};
use crate::error::{CliError, CliResult};
use crate::expr::Expr;
use crate::output::{format_percent, print_csv, print_success, print_table, print_warning};
use crate::settings::ScanSettings;

const DEFAULT_START: f64 = -20.0;
const DEFAULT_END: f64 = 20.0;
const DEFAULT_STEP: f64 = 0.01;

/// Upper bound on the expected number of guesses in one scan.
const MAX_GUESSES: f64 = 1e8;

/// Arguments for the ranges command.
#[derive(Args, Debug, Default)]
pub struct RangesArgs {
    /// Function of x, e.g. "-(x - 1)^2"
    #[arg(short, long, env = "EXTREMA_EXPR", allow_hyphen_values = true)]
    pub expr: Option<String>,

    /// Location of the extremum the searches should land on
    #[arg(short = 'x', long, env = "EXTREMA_EXPECTED", allow_hyphen_values = true)]
    pub expected: Option<f64>,

    /// Kind of extremum (minimum, maximum, inflection) [default: minimum]
    #[arg(short, long, env = "EXTREMA_KIND")]
    pub kind: Option<ExtremumKind>,

    /// First starting guess [default: -20]
    #[arg(short, long, env = "EXTREMA_START", allow_hyphen_values = true)]
    pub start: Option<f64>,

    /// Last starting guess [default: 20]
    #[arg(short = 'E', long, env = "EXTREMA_END", allow_hyphen_values = true)]
    pub end: Option<f64>,

    /// Mean spacing between guesses; each step is jittered uniformly in [0, 2*step) [default: 0.01]
    #[arg(long, env = "EXTREMA_STEP")]
    pub step: Option<f64>,

    /// Precision for every stage and for matching the expected location [default: 2^-24]
    #[arg(short, long, env = "EXTREMA_PREC")]
    pub prec: Option<f64>,

    /// Newton tolerance and derivative step [default: prec]
    #[arg(long, env = "EXTREMA_NEWTON_PREC")]
    pub newton_prec: Option<f64>,

    /// Classifier tolerance [default: prec]
    #[arg(long, env = "EXTREMA_CLASSIFIER_PREC")]
    pub classifier_prec: Option<f64>,

    /// Search round budget [default: 20]
    #[arg(short, long, env = "EXTREMA_MAX_ITERS")]
    pub max_iters: Option<u32>,

    /// Newton iteration budget [default: 20]
    #[arg(long, env = "EXTREMA_NEWTON_MAX_ITERS")]
    pub newton_max_iters: Option<u32>,

    /// Seed for the guess jitter; random when omitted
    #[arg(long, env = "EXTREMA_SEED")]
    pub seed: Option<u64>,

    /// Settings file [default: <config dir>/extrema/ranges.toml if present]
    #[arg(short, long, env = "EXTREMA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Fully resolved scan parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanParams {
    pub expr: String,
    pub expected: f64,
    pub kind: ExtremumKind,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub prec: f64,
    pub newton_prec: f64,
    pub classifier_prec: f64,
    pub max_iters: u32,
    pub newton_max_iters: u32,
    pub seed: Option<u64>,
}

impl ScanParams {
    /// Lays command-line values over file settings over defaults.
    pub fn resolve(args: RangesArgs, file: ScanSettings) -> CliResult<Self> {
        let prec = resolve_prec(args.prec.or(file.prec))?;
        let params = Self {
            expr: args
                .expr
                .or(file.expr)
                .ok_or(CliError::MissingSetting("expr"))?,
            expected: args
                .expected
                .or(file.expected)
                .ok_or(CliError::MissingSetting("expected"))?,
            kind: args.kind.or(file.kind).unwrap_or(ExtremumKind::Minimum),
            start: args.start.or(file.start).unwrap_or(DEFAULT_START),
            end: args.end.or(file.end).unwrap_or(DEFAULT_END),
            step: args.step.or(file.step).unwrap_or(DEFAULT_STEP),
            prec,
            newton_prec: resolve_prec(args.newton_prec.or(file.newton_prec).or(Some(prec)))?,
            classifier_prec: resolve_prec(
                args.classifier_prec.or(file.classifier_prec).or(Some(prec)),
            )?,
            max_iters: args
                .max_iters
                .or(file.max_iters)
                .unwrap_or(DEFAULT_MAX_ITERATIONS),
            newton_max_iters: args
                .newton_max_iters
                .or(file.newton_max_iters)
                .unwrap_or(DEFAULT_MAX_ITERATIONS),
            seed: args.seed.or(file.seed),
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> CliResult<()> {
        if !(self.start.is_finite() && self.end.is_finite()) || self.start >= self.end {
            return Err(CliError::InvalidSetting(format!(
                "start ({}) must be finite and below end ({})",
                self.start, self.end
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CliError::InvalidSetting(format!(
                "step must be finite and positive, got {}",
                self.step
            )));
        }
        // a step below the spacing of floats at either bound never advances the walk
        if self.start + self.step == self.start || self.end + self.step == self.end {
            return Err(CliError::InvalidSetting(format!(
                "step {} is too small to advance from {} to {}",
                self.step, self.start, self.end
            )));
        }
        let expected_guesses = (self.end - self.start) / self.step;
        if expected_guesses > MAX_GUESSES {
            return Err(CliError::InvalidSetting(format!(
                "step {} gives about {:.0} guesses, more than {:.0}",
                self.step, expected_guesses, MAX_GUESSES
            )));
        }
        if !self.expected.is_finite() {
            return Err(CliError::InvalidSetting(format!(
                "expected must be finite, got {}",
                self.expected
            )));
        }
        Ok(())
    }
}

/// A half-open interval of starting guesses `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessRange {
    pub start: f64,
    pub end: f64,
}

/// One row of the report.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RangeRow {
    #[tabled(rename = "Share")]
    pub share: String,
    #[tabled(rename = "Start", display_with = "display_bound")]
    pub start: f64,
    #[tabled(rename = "End", display_with = "display_bound")]
    pub end: f64,
}

fn display_bound(value: &f64) -> String {
    format!("{:.5}", value)
}

/// Full report, for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub expr: String,
    pub kind: ExtremumKind,
    pub expected: f64,
    pub guesses: usize,
    pub ranges: Vec<RangeRow>,
    pub total_share: f64,
}

/// Generates starting guesses from `start` while `<= end`, each step drawn
/// uniformly from `[0, 2 * step)`.
pub fn walk_guesses<R: Rng>(start: f64, end: f64, step: f64, rng: &mut R) -> Vec<f64> {
    let mut guesses = Vec::new();
    let mut guess = start;
    while guess <= end {
        guesses.push(guess);
        guess += step * rng.gen::<f64>() * 2.0;
    }
    guesses
}

/// Groups consecutive convergent guesses into ranges.
///
/// A range runs from its first convergent guess to the first following
/// guess that is not convergent. A range still open after the last guess
/// ends at `end`.
pub fn bucket_ranges(guesses: &[f64], convergent: &[bool], end: f64) -> Vec<GuessRange> {
    let mut ranges = Vec::new();
    let mut current: Option<f64> = None;

    for (&guess, &ok) in guesses.iter().zip(convergent) {
        match (ok, current) {
            (true, None) => current = Some(guess),
            (false, Some(start)) => {
                ranges.push(GuessRange { start, end: guess });
                current = None;
            }
            _ => {}
        }
    }
    if let Some(start) = current {
        ranges.push(GuessRange { start, end });
    }

    ranges
}

/// Turns ranges into report rows sorted by ascending share of the interval,
/// plus the total share.
pub fn summarize(ranges: &[GuessRange], start: f64, end: f64) -> (Vec<RangeRow>, f64) {
    let width = end - start;
    let mut shares: Vec<(f64, GuessRange)> = ranges
        .iter()
        .map(|r| ((r.end - r.start) / width, *r))
        .collect();
    shares.sort_by(|a, b| a.0.total_cmp(&b.0));

    // fold from +0.0: an empty f64 sum is -0.0
    let total = shares.iter().fold(0.0_f64, |acc, (share, _)| acc + share);
    let rows = shares
        .into_iter()
        .map(|(share, r)| RangeRow {
            share: format_percent(share),
            start: r.start,
            end: r.end,
        })
        .collect();

    (rows, total)
}

/// Runs one search and reports whether it landed on the expected location.
///
/// Only budget exhaustion counts as "did not converge"; every other error
/// is returned.
pub fn converges(expr: &Expr, guess: f64, params: &ScanParams) -> MathResult<bool> {
    let result = find_extremum(
        |x| expr.eval(x),
        params.kind,
        newton_strategy(
            guess,
            NewtonConfig::new(params.newton_prec, params.newton_max_iters),
        ),
        &SearchConfig::new(params.prec, params.max_iters).with_classifier(ClassifierOverrides {
            tolerance: Some(params.classifier_prec),
            ..ClassifierOverrides::default()
        }),
    );

    match result {
        Ok(x) => Ok((x - params.expected).abs() <= params.prec),
        Err(e) if e.is_iterations_exceeded() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Runs the full scan.
pub fn scan(params: &ScanParams) -> Result<ScanReport> {
    let expr = parse_expr(&params.expr)?;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let guesses = walk_guesses(params.start, params.end, params.step, &mut rng);
    info!(
        "scanning {} guesses in [{}, {}] for the {} at {}",
        guesses.len(),
        params.start,
        params.end,
        params.kind,
        params.expected
    );

    // searches are independent, so evaluate in parallel and bucket in order
    let convergent = guesses
        .par_iter()
        .map(|&guess| {
            converges(&expr, guess, params)
                .with_context(|| format!("search from guess {} failed", guess))
        })
        .collect::<Result<Vec<bool>>>()?;
    debug!(
        "{} of {} guesses converged",
        convergent.iter().filter(|&&ok| ok).count(),
        guesses.len()
    );

    let ranges = bucket_ranges(&guesses, &convergent, params.end);
    let (rows, total_share) = summarize(&ranges, params.start, params.end);

    Ok(ScanReport {
        expr: params.expr.clone(),
        kind: params.kind,
        expected: params.expected,
        guesses: guesses.len(),
        ranges: rows,
        total_share,
    })
}

/// Execute the ranges command.
pub fn execute(args: RangesArgs, format: OutputFormat) -> Result<()> {
    let file = ScanSettings::load(args.config.as_deref())?;
    let params = ScanParams::resolve(args, file)?;
    let report = scan(&params)?;

    match format {
        OutputFormat::Table => {
            print_table(&report.ranges)?;
            if report.ranges.is_empty() {
                print_warning("no starting guess converged to the expected extremum");
            }
            print_success(&format!(
                "total correct ranges: {}",
                format_percent(report.total_share)
            ));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => print_csv(&report.ranges)?,
        OutputFormat::Minimal => println!("{}", format_percent(report.total_share)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(expr: &str, expected: f64, kind: ExtremumKind) -> ScanParams {
        ScanParams::resolve(
            RangesArgs {
                expr: Some(expr.to_string()),
                expected: Some(expected),
                kind: Some(kind),
                start: Some(-6.0),
                end: Some(6.0),
                step: Some(0.05),
                seed: Some(42),
                ..RangesArgs::default()
            },
            ScanSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_walk_guesses_stays_in_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let guesses = walk_guesses(-1.0, 1.0, 0.01, &mut rng);

        assert_eq!(guesses[0], -1.0);
        assert!(guesses.windows(2).all(|w| w[0] <= w[1]));
        assert!(guesses.iter().all(|&g| g <= 1.0));
        assert!(guesses.len() > 50);
    }

    #[test]
    fn test_walk_guesses_is_reproducible() {
        let a = walk_guesses(0.0, 5.0, 0.1, &mut StdRng::seed_from_u64(9));
        let b = walk_guesses(0.0, 5.0, 0.1, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_bucket_ranges() {
        let guesses = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let convergent = [false, true, true, false, true, false, true];

        let ranges = bucket_ranges(&guesses, &convergent, 10.0);
        assert_eq!(
            ranges,
            vec![
                GuessRange { start: 1.0, end: 3.0 },
                GuessRange { start: 4.0, end: 5.0 },
                GuessRange { start: 6.0, end: 10.0 },
            ]
        );
    }

    #[test]
    fn test_bucket_ranges_none() {
        let ranges = bucket_ranges(&[0.0, 1.0], &[false, false], 2.0);
        assert!(ranges.is_empty());
    }

    #[test]
    fn test_summarize_sorts_by_share() {
        let ranges = [
            GuessRange { start: 0.0, end: 5.0 },
            GuessRange { start: 6.0, end: 7.0 },
        ];
        let (rows, total) = summarize(&ranges, 0.0, 10.0);

        assert_eq!(rows[0].share, "10.00%");
        assert_eq!(rows[0].start, 6.0);
        assert_eq!(rows[1].share, "50.00%");
        assert_relative_eq!(total, 0.6);
    }

    #[test]
    fn test_summarize_empty_is_positive_zero() {
        let (rows, total) = summarize(&[], -6.0, 6.0);

        assert!(rows.is_empty());
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
        assert_eq!(format_percent(total), "0.00%");
    }

    #[test]
    fn test_resolve_layers() {
        let file = ScanSettings {
            expr: Some("x^2".to_string()),
            expected: Some(0.0),
            step: Some(0.5),
            start: Some(-3.0),
            ..ScanSettings::default()
        };
        let args = RangesArgs {
            start: Some(-1.0),
            ..RangesArgs::default()
        };

        let params = ScanParams::resolve(args, file).unwrap();
        assert_eq!(params.expr, "x^2");
        assert_eq!(params.start, -1.0);
        assert_eq!(params.end, DEFAULT_END);
        assert_eq!(params.step, 0.5);
        assert_eq!(params.kind, ExtremumKind::Minimum);
        assert_eq!(params.max_iters, DEFAULT_MAX_ITERATIONS);
        assert_eq!(params.newton_prec, params.prec);
        assert_eq!(params.classifier_prec, params.prec);
    }

    #[test]
    fn test_resolve_stage_precisions() {
        let file = ScanSettings {
            expr: Some("x^2".to_string()),
            expected: Some(0.0),
            prec: Some(1e-6),
            newton_prec: Some(1e-7),
            classifier_prec: Some(1e-3),
            ..ScanSettings::default()
        };
        let args = RangesArgs {
            newton_prec: Some(1e-9),
            ..RangesArgs::default()
        };

        let params = ScanParams::resolve(args, file).unwrap();
        assert_eq!(params.prec, 1e-6);
        assert_eq!(params.newton_prec, 1e-9);
        assert_eq!(params.classifier_prec, 1e-3);

        let args = RangesArgs {
            expr: Some("x".to_string()),
            expected: Some(0.0),
            classifier_prec: Some(0.0),
            ..RangesArgs::default()
        };
        assert!(ScanParams::resolve(args, ScanSettings::default()).is_err());
    }

    #[test]
    fn test_resolve_requires_expr_and_expected() {
        let err = ScanParams::resolve(RangesArgs::default(), ScanSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingSetting("expr")));

        let args = RangesArgs {
            expr: Some("x".to_string()),
            ..RangesArgs::default()
        };
        let err = ScanParams::resolve(args, ScanSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingSetting("expected")));
    }

    #[test]
    fn test_resolve_rejects_bad_interval() {
        let args = RangesArgs {
            expr: Some("x".to_string()),
            expected: Some(0.0),
            start: Some(1.0),
            end: Some(-1.0),
            ..RangesArgs::default()
        };
        assert!(ScanParams::resolve(args, ScanSettings::default()).is_err());

        let args = RangesArgs {
            expr: Some("x".to_string()),
            expected: Some(0.0),
            step: Some(0.0),
            ..RangesArgs::default()
        };
        assert!(ScanParams::resolve(args, ScanSettings::default()).is_err());
    }

    #[test]
    fn test_resolve_rejects_step_below_float_spacing() {
        // floats near 1e17 are 16 apart
        let args = RangesArgs {
            expr: Some("x^2".to_string()),
            expected: Some(0.0),
            start: Some(1e17),
            end: Some(2e17),
            step: Some(0.01),
            ..RangesArgs::default()
        };
        let err = ScanParams::resolve(args, ScanSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidSetting(_)));
    }

    #[test]
    fn test_resolve_rejects_too_many_guesses() {
        let args = RangesArgs {
            expr: Some("x^2".to_string()),
            expected: Some(0.0),
            step: Some(1e-12),
            ..RangesArgs::default()
        };
        let err = ScanParams::resolve(args, ScanSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidSetting(_)));

        let args = RangesArgs {
            expr: Some("x^2".to_string()),
            expected: Some(0.0),
            start: Some(-1e308),
            end: Some(1e308),
            step: Some(1e300),
            ..RangesArgs::default()
        };
        assert!(ScanParams::resolve(args, ScanSettings::default()).is_err());
    }

    #[test]
    fn test_parabola_converges_everywhere() {
        let report = scan(&params("-(x - 1)^2", 1.0, ExtremumKind::Maximum)).unwrap();

        assert_eq!(report.ranges.len(), 1);
        assert_relative_eq!(report.total_share, 1.0);
    }

    #[test]
    fn test_wrong_expectation_never_converges() {
        let report = scan(&params("-(x - 1)^2", 2.0, ExtremumKind::Maximum)).unwrap();

        assert!(report.ranges.is_empty());
        assert_eq!(report.total_share, 0.0);
        assert!(report.total_share.is_sign_positive());
    }

    #[test]
    fn test_non_convergence_is_not_fatal() {
        // the flat function exhausts the classifier budget from every guess
        let mut p = params("0", 0.0, ExtremumKind::Minimum);
        p.max_iters = 8;
        let report = scan(&p).unwrap();
        assert!(report.ranges.is_empty());
    }

    #[test]
    fn test_converges_propagates_other_errors() {
        let expr: Expr = "x".parse().unwrap();
        let mut p = params("x", 0.0, ExtremumKind::Minimum);
        p.prec = -1.0;
        assert!(converges(&expr, 0.0, &p).is_err());
    }

    #[test]
    fn test_stage_precisions_reach_the_search() {
        let expr: Expr = "-(x - 1)^2".parse().unwrap();

        let mut p = params("-(x - 1)^2", 1.0, ExtremumKind::Maximum);
        p.newton_prec = -1.0;
        assert!(converges(&expr, 3.0, &p).is_err());

        let mut p = params("-(x - 1)^2", 1.0, ExtremumKind::Maximum);
        p.classifier_prec = -1.0;
        assert!(converges(&expr, 3.0, &p).is_err());
    }
}
