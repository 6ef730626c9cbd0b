//! Higher-order derivative test.

use log::{debug, trace};

use crate::differentiation::derivative;
use crate::error::{MathError, MathResult};
use crate::extremum::{ClassifierConfig, ExtremumKind};
use crate::NumericFn;

/// Classifies the critical point of `f` at `x`.
///
/// Differentiates `f` repeatedly until the first order `n` whose derivative
/// at `x` exceeds the tolerance in magnitude. With `d = n + nth_derivative`:
///
/// - `d == 1`: `x` is not a critical point, [`MathError::NotAnExtremum`]
/// - `d` odd: [`ExtremumKind::Inflection`]
/// - `d` even: [`ExtremumKind::Minimum`] if the derivative is positive,
///   [`ExtremumKind::Maximum`] if negative
///
/// This generalizes the second-derivative test to points such as `x^4` at
/// zero, where the second derivative vanishes too.
///
/// Fails with [`MathError::IterationsExceeded`] if no derivative up to
/// order `max_iterations` is non-vanishing. Each order doubles the number
/// of evaluations of `f`.
///
/// # Example
///
/// ```rust
/// use extrema_math::extremum::{extremum_kind, ClassifierConfig, ExtremumKind};
///
/// let kind = extremum_kind(|x: f64| x.powi(4), 0.0, &ClassifierConfig::default()).unwrap();
/// assert_eq!(kind, ExtremumKind::Minimum);
/// ```
pub fn extremum_kind<F>(f: F, x: f64, config: &ClassifierConfig) -> MathResult<ExtremumKind>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let tolerance = config.tolerance;
    let derivative_config = config.derivative_config();

    let mut df: NumericFn<'_> = Box::new(f);
    for n in 1..=config.max_iterations {
        df = Box::new(derivative(df, &derivative_config));
        let dfx = df(x);
        trace!("classify: derivative of order {} at {} is {}", n, x, dfx);

        if dfx.abs() > tolerance {
            let order = n + config.nth_derivative;
            if order % 2 == 1 {
                if order == 1 {
                    return Err(MathError::NotAnExtremum { x, slope: dfx });
                }
                return Ok(ExtremumKind::Inflection);
            }

            return if dfx > tolerance {
                Ok(ExtremumKind::Minimum)
            } else if dfx < -tolerance {
                Ok(ExtremumKind::Maximum)
            } else {
                Err(MathError::InvariantViolation { order, value: dfx })
            };
        }
    }

    debug!(
        "classify: every derivative up to order {} vanishes at {}",
        config.max_iterations, x
    );
    Err(MathError::iterations_exceeded(config.max_iterations))
}
