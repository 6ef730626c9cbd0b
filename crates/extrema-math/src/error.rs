//! Error types for numerical analysis operations.

use thiserror::Error;

/// A specialized Result type for numerical analysis operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while analyzing a function.
///
/// NaN and infinite results are not errors; they are returned as values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// An iterative loop exhausted its budget without reaching a stopping
    /// condition.
    #[error("Max iterations exceeded ({max_iterations})")]
    IterationsExceeded {
        /// The budget that was exhausted.
        max_iterations: u32,
    },

    /// The point being classified has a non-vanishing first derivative.
    #[error("Not an extremum: f'({x}) = {slope:.2e}")]
    NotAnExtremum {
        /// The point that was classified.
        x: f64,
        /// The first derivative at that point.
        slope: f64,
    },

    /// An even-order derivative passed the non-vanishing check but sits
    /// inside the tolerance band. Indicates a miscalibrated precision.
    #[error("Invariant violated: derivative of order {order} is {value:.2e}, inside the tolerance band")]
    InvariantViolation {
        /// Derivative order at which the check failed.
        order: u32,
        /// The offending derivative value.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an iterations exceeded error.
    #[must_use]
    pub fn iterations_exceeded(max_iterations: u32) -> Self {
        Self::IterationsExceeded { max_iterations }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true if this is the budget-exhaustion signal.
    ///
    /// Callers scanning many starting points treat this one error as
    /// "did not converge" and propagate every other.
    #[must_use]
    pub fn is_iterations_exceeded(&self) -> bool {
        matches!(self, Self::IterationsExceeded { .. })
    }
}
