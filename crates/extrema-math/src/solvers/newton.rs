//! Newton-Raphson root-finding algorithm.

use log::{debug, trace};

use crate::differentiation::derivative;
use crate::error::{MathError, MathResult};
use crate::solvers::NewtonConfig;

/// Newton-Raphson root-finding with a numerical derivative.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// where `f'` is the central-difference derivative built from
/// [`NewtonConfig::derivative_config`].
///
/// The loop runs `max_iterations + 1` times. It stops with `Ok` when
/// `|f(x)| <= tolerance`, when the step is within `tolerance`, or when the
/// next iterate is NaN or infinite. The last case is a divergence stop and
/// returns the degenerate iterate as the answer.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use extrema_math::solvers::{roots_newton, NewtonConfig};
///
/// let root = roots_newton(|x: f64| x * x - 2.0, 1.5, &NewtonConfig::default()).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
pub fn roots_newton<F>(f: F, initial_guess: f64, config: &NewtonConfig) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let tolerance = config.tolerance;
    let df = derivative(&f, &config.derivative_config());

    let mut x = initial_guess;
    for iteration in 0..=config.max_iterations {
        let fx = f(x);

        if fx.abs() <= tolerance {
            trace!("newton: root at x = {} after {} iterations", x, iteration);
            return Ok(x);
        }

        let previous = x;
        x -= fx / df(x);
        trace!("newton: iteration {}: x = {}", iteration, x);

        if (x - previous).abs() <= tolerance {
            return Ok(x);
        }
        if !x.is_finite() {
            debug!(
                "newton: diverged to {} from initial guess {}",
                x, initial_guess
            );
            return Ok(x);
        }
    }

    debug!(
        "newton: no convergence from {} within {} iterations",
        initial_guess, config.max_iterations
    );
    Err(MathError::iterations_exceeded(config.max_iterations))
}
