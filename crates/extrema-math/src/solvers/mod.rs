//! Root-finding algorithms.
//!
//! This module provides [`roots_newton`], a Newton-Raphson solver whose
//! derivative is itself approximated numerically, so only the ability to
//! evaluate the function is required.
//!
//! # Stopping conditions
//!
//! | Condition | Result |
//! |-----------|--------|
//! | `\|f(x)\| <= tolerance` | `Ok(x)`, a root |
//! | step `<= tolerance` | `Ok(x)`, converged |
//! | iterate is NaN or infinite | `Ok(x)`, diverged |
//! | budget exhausted | `Err(IterationsExceeded)` |
//!
//! A diverged result is a value, not an error: callers scanning many
//! starting points must check `is_finite` themselves.

mod newton;

pub use newton::roots_newton;

use crate::differentiation::DerivativeConfig;
use crate::error::MathResult;
use crate::{check_budget, check_precision, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Zero and step-convergence tolerance.
    pub tolerance: f64,
    /// Nominal iteration budget. The loop makes one extra pass.
    pub max_iterations: u32,
    /// Differentiation settings. Defaults to a step equal to `tolerance`.
    pub derivative: Option<DerivativeConfig>,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative: None,
        }
    }
}

impl NewtonConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            derivative: None,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Overrides the differentiation settings.
    #[must_use]
    pub fn with_derivative(mut self, derivative: DerivativeConfig) -> Self {
        self.derivative = Some(derivative);
        self
    }

    /// Returns the differentiation settings in effect.
    pub fn derivative_config(&self) -> DerivativeConfig {
        self.derivative
            .unwrap_or_else(|| DerivativeConfig::new(self.tolerance))
    }

    /// Checks tolerance, budget and the effective derivative step.
    pub fn validate(&self) -> MathResult<()> {
        check_precision("tolerance", self.tolerance)?;
        check_budget(self.max_iterations)?;
        self.derivative_config().validate()
    }
}

/// Builds a root-finding strategy that runs [`roots_newton`] from a fixed
/// starting guess.
///
/// This is the usual `find_root` argument of
/// [`find_extremum`](crate::extremum::find_extremum).
pub fn newton_strategy(
    initial_guess: f64,
    config: NewtonConfig,
) -> impl FnMut(&dyn Fn(f64) -> f64) -> MathResult<f64> {
    move |f: &dyn Fn(f64) -> f64| roots_newton(f, initial_guess, &config)
}
