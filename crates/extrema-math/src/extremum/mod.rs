//! Classification and search of critical points.
//!
//! - [`extremum_kind`]: higher-order derivative test at a single point
//! - [`find_extremum`]: repeated root-finding on the derivative, deflating
//!   critical points of the wrong kind until one of the requested kind is
//!   found
//!
//! The root-finding strategy is supplied by the caller, usually
//! [`newton_strategy`](crate::solvers::newton_strategy) from a chosen
//! starting guess.

mod classify;
mod search;

pub use classify::extremum_kind;
pub use search::{divide_by_root, find_extremum};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::differentiation::DerivativeConfig;
use crate::error::{MathError, MathResult};
use crate::{check_budget, check_precision, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};

/// The kind of a critical point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    /// Local minimum.
    Minimum,
    /// Local maximum.
    Maximum,
    /// Stationary point of inflection.
    Inflection,
}

impl ExtremumKind {
    /// All kinds, in declaration order.
    pub const ALL: [ExtremumKind; 3] = [Self::Minimum, Self::Maximum, Self::Inflection];

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Inflection => "inflection",
        }
    }
}

impl fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtremumKind {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimum" | "min" => Ok(Self::Minimum),
            "maximum" | "max" => Ok(Self::Maximum),
            "inflection" => Ok(Self::Inflection),
            other => Err(MathError::invalid_input(format!(
                "unknown extremum kind '{}', expected minimum, maximum or inflection",
                other
            ))),
        }
    }
}

/// Acceptance test for a classified critical point.
///
/// Implemented by [`ExtremumKind`], which accepts exactly that kind, and by
/// any `Fn(f64, ExtremumKind) -> bool` for custom logic.
///
/// # Example
///
/// ```rust
/// use extrema_math::extremum::{ExtremumKind, ExtremumTest};
///
/// let not_a_maximum = |_x: f64, kind: ExtremumKind| kind != ExtremumKind::Maximum;
/// assert!(not_a_maximum.accepts(0.0, ExtremumKind::Inflection));
/// assert!(!ExtremumKind::Minimum.accepts(0.0, ExtremumKind::Maximum));
/// ```
pub trait ExtremumTest {
    /// Returns true if a critical point at `x` of kind `kind` is acceptable.
    fn accepts(&self, x: f64, kind: ExtremumKind) -> bool;
}

impl ExtremumTest for ExtremumKind {
    fn accepts(&self, _x: f64, kind: ExtremumKind) -> bool {
        *self == kind
    }
}

impl<F> ExtremumTest for F
where
    F: Fn(f64, ExtremumKind) -> bool,
{
    fn accepts(&self, x: f64, kind: ExtremumKind) -> bool {
        self(x, kind)
    }
}

/// Configuration for the higher-order derivative test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Threshold above which a derivative counts as non-vanishing.
    pub tolerance: f64,
    /// Highest derivative order examined.
    pub max_iterations: u32,
    /// Order of the function being classified relative to the function of
    /// interest. `1` means the input is already a first derivative.
    pub nth_derivative: u32,
    /// Differentiation settings. Defaults to a step equal to `tolerance`.
    pub derivative: Option<DerivativeConfig>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            nth_derivative: 0,
            derivative: None,
        }
    }
}

impl ClassifierConfig {
    /// Creates a new classifier configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum derivative order.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the derivative order offset of the input function.
    #[must_use]
    pub fn with_nth_derivative(mut self, nth_derivative: u32) -> Self {
        self.nth_derivative = nth_derivative;
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

/// Classifier settings that [`find_extremum`] lays over its own.
///
/// Unset fields inherit from the enclosing [`SearchConfig`]. The
/// derivative order offset is not overridable: the search always
/// classifies a first derivative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifierOverrides {
    /// Classifier tolerance.
    pub tolerance: Option<f64>,
    /// Classifier derivative order limit.
    pub max_iterations: Option<u32>,
    /// Classifier differentiation settings.
    pub derivative: Option<DerivativeConfig>,
}

/// Configuration for the extremum search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Tolerance, inherited by differentiation and classification.
    pub tolerance: f64,
    /// Maximum number of root-finding rounds.
    pub max_iterations: u32,
    /// Differentiation settings. Defaults to a step equal to `tolerance`.
    pub derivative: Option<DerivativeConfig>,
    /// Overrides for the classifier.
    pub classifier: ClassifierOverrides,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative: None,
            classifier: ClassifierOverrides::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a new search configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum number of rounds.
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

    /// Sets the classifier overrides.
    #[must_use]
    pub fn with_classifier(mut self, classifier: ClassifierOverrides) -> Self {
        self.classifier = classifier;
        self
    }

    /// Returns the differentiation settings in effect.
    pub fn derivative_config(&self) -> DerivativeConfig {
        self.derivative
            .unwrap_or_else(|| DerivativeConfig::new(self.tolerance))
    }

    /// Returns the classifier settings in effect.
    ///
    /// Each field is the override if set, else the search's own value.
    /// The derivative settings fall back to the search's resolved ones,
    /// not to an overridden classifier tolerance.
    pub fn classifier_config(&self) -> ClassifierConfig {
        let overrides = &self.classifier;
        ClassifierConfig {
            tolerance: overrides.tolerance.unwrap_or(self.tolerance),
            max_iterations: overrides.max_iterations.unwrap_or(self.max_iterations),
            nth_derivative: 1,
            derivative: Some(
                overrides
                    .derivative
                    .unwrap_or_else(|| self.derivative_config()),
            ),
        }
    }

    /// Checks this configuration and the classifier settings it implies.
    pub fn validate(&self) -> MathResult<()> {
        check_precision("tolerance", self.tolerance)?;
        check_budget(self.max_iterations)?;
        self.derivative_config().validate()?;
        self.classifier_config().validate()
    }
}
