//! Numerical differentiation.
//!
//! Derivatives are approximated with the central difference
//!
//! `f'(x) = (f(x + h) - f(x - h)) / 2h`
//!
//! which has truncation error `O(h^2)`, against `O(h)` for the forward
//! difference at the same step. The result is itself a function, so
//! differentiating it again gives the second derivative, and so on.

use crate::error::MathResult;
use crate::{check_precision, DEFAULT_PRECISION};

/// Configuration for numerical differentiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeConfig {
    /// Finite-difference step `h`.
    pub step: f64,
}

impl Default for DerivativeConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_PRECISION,
        }
    }
}

impl DerivativeConfig {
    /// Creates a new differentiation configuration.
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// Sets the step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Checks that the step is finite and strictly positive.
    pub fn validate(&self) -> MathResult<()> {
        check_precision("derivative step", self.step)
    }
}

/// Returns the central-difference derivative of `f`.
///
/// A step that is too large biases the estimate; one that is too small
/// loses the difference to cancellation. `f` must be defined on
/// `[x - h, x + h]` for every `x` the result is evaluated at. Non-finite
/// values of `f` flow through unchanged.
///
/// # Example
///
/// ```rust
/// use extrema_math::differentiation::{derivative, DerivativeConfig};
///
/// let df = derivative(|x: f64| x * x * x, &DerivativeConfig::default());
/// assert!((df(2.0) - 12.0).abs() < 1e-6);
///
/// // nesting compounds cancellation error, so take a coarser step
/// let coarse = DerivativeConfig::new(1e-4);
/// let d2f = derivative(derivative(|x: f64| x * x * x, &coarse), &coarse);
/// assert!((d2f(2.0) - 12.0).abs() < 1e-3);
/// ```
pub fn derivative<F>(f: F, config: &DerivativeConfig) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = config.step;
    move |x| (f(x + h) - f(x - h)) / (2.0 * h)
}
