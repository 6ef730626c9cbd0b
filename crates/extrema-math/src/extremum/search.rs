//! Extremum search by derivative deflation.

use log::{debug, trace};

use crate::differentiation::derivative;
use crate::error::{MathError, MathResult};
use crate::extremum::{extremum_kind, ExtremumTest, SearchConfig};
use crate::NumericFn;

/// Divides a known root out of `f`: `x -> f(x) / (x - root)`.
///
/// The quotient is singular at `root`, which pushes later root searches
/// toward the other roots of `f`, like polynomial deflation.
pub fn divide_by_root<F>(f: F, root: f64) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |x| f(x) / (x - root)
}

/// Finds a critical point of `f` that passes `test`.
///
/// Each round asks `find_root` for a root `x0` of the current derivative
/// `df`, then:
///
/// 1. if `x0` is NaN or infinite, returns it as is;
/// 2. classifies `x0` on `df` as a first derivative and returns it if the
///    kind passes `test`;
/// 3. otherwise replaces `df` with `df(x) / (x - x0)` and goes again.
///
/// Fails with [`MathError::IterationsExceeded`] after `max_iterations`
/// rounds without an accepted point. Errors from `find_root` and from the
/// classifier propagate unchanged.
///
/// Deflation loses accuracy near removed roots, and the classifier's
/// repeated differentiation amplifies it, so after a few rounds a looser
/// tolerance may be needed.
///
/// # Arguments
///
/// * `f` - The function whose critical points are searched
/// * `test` - An [`ExtremumKind`](crate::extremum::ExtremumKind) or a
///   predicate over `(x, kind)`
/// * `find_root` - Strategy returning one root of the function it is given
/// * `config` - Search configuration
///
/// # Example
///
/// ```rust
/// use extrema_math::prelude::*;
///
/// // maximum at 0, minima at +-1/sqrt(2)
/// let f = |x: f64| x.powi(4) - x * x;
/// let x = find_extremum(
///     f,
///     ExtremumKind::Minimum,
///     newton_strategy(0.2, NewtonConfig::default()),
///     &SearchConfig::default(),
/// )
/// .unwrap();
/// assert!((x - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-4);
/// ```
pub fn find_extremum<F, T, R>(
    f: F,
    test: T,
    mut find_root: R,
    config: &SearchConfig,
) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
    T: ExtremumTest,
    R: FnMut(&dyn Fn(f64) -> f64) -> MathResult<f64>,
{
    config.validate()?;

    let classifier_config = config.classifier_config();
    let mut df: NumericFn<'_> = Box::new(derivative(f, &config.derivative_config()));

    for round in 0..config.max_iterations {
        let x0 = find_root(&*df)?;
        if !x0.is_finite() {
            debug!("search: root finder returned {} in round {}", x0, round);
            return Ok(x0);
        }

        let kind = extremum_kind(&*df, x0, &classifier_config)?;
        if test.accepts(x0, kind) {
            trace!("search: accepted {} at {} in round {}", kind, x0, round);
            return Ok(x0);
        }

        debug!("search: deflating rejected {} at {}", kind, x0);
        df = Box::new(divide_by_root(df, x0));
    }

    debug!(
        "search: no acceptable extremum within {} rounds",
        config.max_iterations
    );
    Err(MathError::iterations_exceeded(config.max_iterations))
}
