//! Per-knot series feeding the tridiagonal moment system. Index 0 of every series is an
//! unused sentinel so that indices line up with knot numbers.

use nalgebra::DVector;

use crate::error::SplineError;

/// Differences between consecutive values: `h[0] = 0`, `h[i] = v[i] - v[i-1]`.
pub fn differences(values: &[f64]) -> DVector<f64> {
    let mut h = DVector::<f64>::zeros(values.len());
    for i in 1..values.len() {
        h[i] = values[i] - values[i - 1];
    }
    h
}

/// Interior blending weights `λ[i] = h[i] / (h[i] + h[i+1])` for `1 <= i <= n-2`.
///
/// # Errors
/// [SplineError::DegenerateInput] when `h[i] + h[i+1]` is zero for some interior `i`.
pub fn weights(h: &DVector<f64>) -> Result<DVector<f64>, SplineError> {
    let n = h.len();
    let mut lambdas = DVector::<f64>::zeros(n);

    for i in 1..n.saturating_sub(1) {
        let span = h[i] + h[i + 1];
        if span == 0.0 {
            return Err(SplineError::DegenerateInput { index: i + 1 });
        }
        lambdas[i] = h[i] / span;
    }
    Ok(lambdas)
}

/// Right hand side of the moment system: six times the second order divided difference
/// `d[i] = 6 * f[t[i-1], t[i], t[i+1]]` for `1 <= i <= n-2`.
///
/// # Errors
/// - [SplineError::DegenerateInput] when two knots involved in a divided difference coincide,
/// - [SplineError::NumericalInstability] when a divided difference overflows.
pub fn curvature_rhs(knots: &[f64], values: &[f64]) -> Result<DVector<f64>, SplineError> {
    debug_assert_eq!(knots.len(), values.len());
    let n = knots.len();
    let mut d = DVector::<f64>::zeros(n);

    for i in 1..n.saturating_sub(1) {
        let left = knots[i] - knots[i - 1];
        let right = knots[i + 1] - knots[i];
        let span = knots[i + 1] - knots[i - 1];

        if left == 0.0 {
            return Err(SplineError::DegenerateInput { index: i });
        }
        if right == 0.0 || span == 0.0 {
            return Err(SplineError::DegenerateInput { index: i + 1 });
        }

        let right_slope = (values[i + 1] - values[i]) / right;
        let left_slope = (values[i] - values[i - 1]) / left;
        d[i] = 6.0 * (right_slope - left_slope) / span;
        if !d[i].is_finite() {
            return Err(SplineError::NumericalInstability { index: i });
        }
    }
    Ok(d)
}
