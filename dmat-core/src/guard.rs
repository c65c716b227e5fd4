//! Numeric guard
//!
//! Every value written into a matrix, and every operand read by the
//! arithmetic and cofactor engines, passes through [`check_finite`] first.

use crate::{MatrixError, Result};

/// Absolute tolerance for element comparison
pub const EPSILON: f64 = 1e-7;

/// Reject NaN and ±infinity
pub fn check_finite(x: f64) -> Result<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(MatrixError::non_finite(x))
    }
}

/// `|a - b| < EPSILON`
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Tolerant comparison that refuses to compare undefined pairs.
///
/// NaN on either side, or two infinities of the same sign, is a
/// `DataError`. Opposite infinities, or one infinity against a finite
/// value, are simply unequal.
pub fn complex_eq(a: f64, b: f64) -> Result<bool> {
    let same_sign_infinity = a.is_infinite()
        && b.is_infinite()
        && a.is_sign_positive() == b.is_sign_positive();
    if a.is_nan() || b.is_nan() || same_sign_infinity {
        return Err(MatrixError::incomparable(a, b));
    }
    Ok(approx_eq(a, b))
}
