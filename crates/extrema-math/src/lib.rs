//! # Extrema Math
//!
//! Numerical primitives for analyzing a real function that can only be
//! evaluated pointwise.
//!
//! This crate provides:
//!
//! - **Differentiation**: Central-difference derivatives that compose into
//!   higher-order derivatives
//! - **Solvers**: Derivative-free Newton-Raphson root-finding
//! - **Extremum**: Higher-order derivative test and a deflating search for
//!   minima, maxima and inflection points
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every operation is a pure function of its inputs
//! - **Degenerate values are data**: NaN and infinite results are returned,
//!   not raised
//! - **Bounded**: Every loop runs under an iteration budget
//!
//! ## Example
//!
//! ```rust
//! use extrema_math::prelude::*;
//!
//! let f = |x: f64| -(x - 1.0).powi(2);
//! let x = find_extremum(
//!     f,
//!     ExtremumKind::Maximum,
//!     |df| roots_newton(df, 3.0, &NewtonConfig::default()),
//!     &SearchConfig::default(),
//! )
//! .unwrap();
//! assert!((x - 1.0).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod differentiation;
pub mod error;
pub mod extremum;
pub mod solvers;

/// Default precision: the finite-difference step and the zero tolerance.
///
/// Equal to the single-precision machine epsilon, `2^-24`. The double
/// precision epsilon is too small to survive the cancellation in a
/// central difference.
pub const DEFAULT_PRECISION: f64 = 1.0 / 16_777_216.0;

/// Default iteration budget shared by every iterative operation.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// A boxed numeric function.
///
/// Used where a function is wrapped repeatedly in a loop, so its concrete
/// type changes on every pass.
pub type NumericFn<'a> = Box<dyn Fn(f64) -> f64 + 'a>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::differentiation::{derivative, DerivativeConfig};
    pub use crate::error::{MathError, MathResult};
    pub use crate::extremum::{
        divide_by_root, extremum_kind, find_extremum, ClassifierConfig, ClassifierOverrides,
        ExtremumKind, ExtremumTest, SearchConfig,
    };
    pub use crate::solvers::{newton_strategy, roots_newton, NewtonConfig};
    pub use crate::{NumericFn, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};
}

pub use error::{MathError, MathResult};

/// Checks that a precision is usable as a step and tolerance.
pub(crate) fn check_precision(name: &str, value: f64) -> MathResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "{} must be finite and strictly positive, got {}",
            name, value
        )))
    }
}

/// Checks that an iteration budget allows at least one pass.
pub(crate) fn check_budget(max_iterations: u32) -> MathResult<()> {
    if max_iterations == 0 {
        Err(MathError::invalid_input("max_iterations must be at least 1"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_precision_is_small() {
        assert!(DEFAULT_PRECISION > 0.0);
        assert!(DEFAULT_PRECISION < 0.0001);
        assert_eq!(DEFAULT_PRECISION, 2f64.powi(-24));
    }

    #[test]
    fn test_checks() {
        assert!(check_precision("tolerance", 1e-6).is_ok());
        assert!(check_precision("tolerance", 0.0).is_err());
        assert!(check_precision("tolerance", -1e-6).is_err());
        assert!(check_precision("tolerance", f64::NAN).is_err());
        assert!(check_precision("tolerance", f64::INFINITY).is_err());
        assert!(check_budget(1).is_ok());
        assert!(check_budget(0).is_err());
    }
}
