//! Bracketing root finder.
//!
//! Plain interval bisection: the bracket halves on every step, so the number of
//! iterations needed is `ceil(log2((upper - lower) / tolerance))` and does not depend
//! on the shape of the function.

use super::error::PricingError;

/// A root located by [`bisect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Abscissa where the function is approximately zero.
    pub value: f64,
    /// Number of function evaluations after the two endpoint evaluations.
    pub iterations: u32,
}

fn validate_bracket(lower: f64, upper: f64, tolerance: f64) -> Result<(), PricingError> {
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(PricingError::InvalidParams {
            message: format!("bracket bounds must be finite, got [{lower}, {upper}]"),
        });
    }

    if lower >= upper {
        return Err(PricingError::InvalidParams {
            message: format!("lower bound {lower} must be below upper bound {upper}"),
        });
    }

    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(PricingError::InvalidParams {
            message: format!("tolerance must be positive, got {tolerance}"),
        });
    }

    Ok(())
}

/// Finds a zero of `f` inside `[lower, upper]` by bisection.
///
/// `f(lower)` and `f(upper)` must have opposite signs, or one of them must be exactly
/// zero, in which case that endpoint is returned without iterating. At each step the
/// midpoint is evaluated; an exact zero is returned immediately, otherwise the half
/// that still brackets a sign change is kept. Iteration stops once the interval is
/// narrower than `tolerance` and the midpoint of the final interval is returned.
///
/// # Arguments
/// - `f`: Continuous function to solve
/// - `lower`: Lower end of the bracket
/// - `upper`: Upper end of the bracket
/// - `tolerance`: Final interval width
/// - `max_iterations`: Upper limit on midpoint evaluations
///
/// # Returns
/// - `Ok(Root)`: Located root and iterations used
/// - `Err(PricingError::NotBracketed)`: No sign change across the bracket, or a
///   non-finite value at either end
/// - `Err(PricingError::InvalidParams)`: Malformed bracket or tolerance, or a
///   non-finite value inside the bracket
/// - `Err(PricingError::ConvergenceFailure)`: `max_iterations` exhausted
///
/// # Example
/// ```
/// use greeks_rs::pricing::bisect;
///
/// let root = bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-9, 100).unwrap();
/// assert!((root.value - 2f64.sqrt()).abs() < 1e-9);
/// ```
pub fn bisect<F>(
    mut f: F,
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iterations: u32,
) -> Result<Root, PricingError>
where
    F: FnMut(f64) -> f64,
{
    validate_bracket(lower, upper, tolerance)?;

    let f_lower = f(lower);
    let f_upper = f(upper);

    let not_bracketed = || PricingError::NotBracketed {
        lower,
        upper,
        f_lower,
        f_upper,
    };

    if !(f_lower.is_finite() && f_upper.is_finite()) {
        return Err(not_bracketed());
    }

    if f_lower == 0.0 {
        return Ok(Root {
            value: lower,
            iterations: 0,
        });
    }
    if f_upper == 0.0 {
        return Ok(Root {
            value: upper,
            iterations: 0,
        });
    }

    if (f_lower > 0.0) == (f_upper > 0.0) {
        return Err(not_bracketed());
    }

    let mut low = lower;
    let mut high = upper;
    let mut f_low = f_lower;
    let mut iterations = 0u32;

    while high - low >= tolerance {
        let mid = low + 0.5 * (high - low);

        // Bracket collapsed to adjacent floats.
        if mid <= low || mid >= high {
            break;
        }

        if iterations >= max_iterations {
            return Err(PricingError::ConvergenceFailure {
                iterations,
                last_value: mid,
            });
        }
        iterations += 1;

        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Ok(Root {
                value: mid,
                iterations,
            });
        }
        if !f_mid.is_finite() {
            return Err(PricingError::InvalidParams {
                message: format!("function is not finite at {mid}"),
            });
        }

        if (f_mid > 0.0) == (f_low > 0.0) {
            low = mid;
            f_low = f_mid;
        } else {
            high = mid;
        }
    }

    Ok(Root {
        value: low + 0.5 * (high - low),
        iterations,
    })
}
