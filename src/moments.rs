use nalgebra::DVector;

use crate::error::SplineError;

/// Solves the natural spline system
/// `λ[i]·m[i-1] + 2·m[i] + (1-λ[i])·m[i+1] = d[i]` for `1 <= i <= n-2`
/// with `m[0] = m[n-1] = 0`.
///
/// The forward sweep eliminates the sub-diagonal into `m[i] = p[i]·m[i+1] + q[i]`,
/// starting from `p[0] = q[0] = 0` which pins the first moment to zero. The backward
/// sweep then fills the moments from the end of the grid.
///
/// # Errors
/// [SplineError::NumericalInstability] when a forward sweep pivot is zero, which only
/// happens for a corrupted weight series, or when an intermediate or a moment is not finite.
pub fn solve_moments(
    lambdas: &DVector<f64>,
    d: &DVector<f64>,
) -> Result<DVector<f64>, SplineError> {
    debug_assert_eq!(lambdas.len(), d.len());
    let n = lambdas.len();
    let mut moments = DVector::<f64>::zeros(n);
    if n < 2 {
        return Ok(moments);
    }

    let mut p = DVector::<f64>::zeros(n - 1);
    let mut q = DVector::<f64>::zeros(n - 1);

    for i in 1..n - 1 {
        let pivot = lambdas[i] * p[i - 1] + 2.0;
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(SplineError::NumericalInstability { index: i });
        }
        p[i] = (lambdas[i] - 1.0) / pivot;
        q[i] = (d[i] - lambdas[i] * q[i - 1]) / pivot;
        if !q[i].is_finite() {
            return Err(SplineError::NumericalInstability { index: i });
        }
    }

    moments[n - 1] = 0.0;
    moments[n - 2] = q[n - 2];
    for i in (0..n - 2).rev() {
        moments[i] = p[i] * moments[i + 1] + q[i];
        if !moments[i].is_finite() {
            return Err(SplineError::NumericalInstability { index: i });
        }
    }

    log::trace!("solved {} moments", n);
    Ok(moments)
}
