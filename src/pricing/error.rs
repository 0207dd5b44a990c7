//! Error types for pricing and implied volatility calculation.

use std::fmt;

/// Errors raised by the numerical core.
///
/// Per-contract failures inside [`GreeksEngine`](super::GreeksEngine) never surface as
/// this type; they are folded into [`ImpliedVolatility::Unavailable`](super::ImpliedVolatility)
/// and [`GreekValue::Indeterminate`](super::GreekValue).
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// The function does not change sign across the supplied interval.
    NotBracketed {
        /// Lower end of the interval.
        lower: f64,
        /// Upper end of the interval.
        upper: f64,
        /// Function value at the lower end.
        f_lower: f64,
        /// Function value at the upper end.
        f_upper: f64,
    },

    /// Invalid input parameters.
    InvalidParams {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Solver exhausted its iteration budget before the interval became narrow enough.
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last estimate before giving up.
        last_value: f64,
    },
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::NotBracketed {
                lower,
                upper,
                f_lower,
                f_upper,
            } => {
                write!(
                    f,
                    "root is not bracketed in [{lower}, {upper}] (f(lower) = {f_lower:.6}, f(upper) = {f_upper:.6})"
                )
            }
            PricingError::InvalidParams { message } => {
                write!(f, "invalid parameters: {message}")
            }
            PricingError::ConvergenceFailure {
                iterations,
                last_value,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last value: {last_value:.6}"
                )
            }
        }
    }
}

impl std::error::Error for PricingError {}
