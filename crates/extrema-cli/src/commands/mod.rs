//! CLI command implementations.

pub mod classify;
pub mod extremum;
pub mod ranges;
pub mod root;

// Re-export submodules for convenience
pub use classify::ClassifyArgs;
pub use extremum::ExtremumArgs;
pub use ranges::RangesArgs;
pub use root::RootArgs;

use extrema_math::DEFAULT_PRECISION;

use crate::error::{CliError, CliResult};
use crate::expr::Expr;

/// Parses a function expression.
pub fn parse_expr(s: &str) -> CliResult<Expr> {
    s.parse()
}

/// Validates a precision, falling back to the default.
pub fn resolve_prec(prec: Option<f64>) -> CliResult<f64> {
    let prec = prec.unwrap_or(DEFAULT_PRECISION);
    if !(prec.is_finite() && prec > 0.0) {
        return Err(CliError::InvalidSetting(format!(
            "prec must be finite and positive, got {}",
            prec
        )));
    }
    Ok(prec)
}
