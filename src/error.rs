use std::{error::Error, fmt::Display};

use crate::curve::MAX_RESOLUTION;

/// Failures raised while building or evaluating a spline. Every variant is structural:
/// the computation is deterministic, so retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Not enough control points to define a curve.
    InsufficientPoints { required: usize, actual: usize },
    /// Coordinate channels (or knots and values) have different lengths.
    LengthMismatch { expected: usize, actual: usize },
    /// Zero or negative spacing between the knots ending at `index`,
    /// or two consecutive coincident control points.
    DegenerateInput { index: usize },
    /// Zero pivot, or a curvature term or moment overflowing to a non-finite value,
    /// at knot `index`.
    NumericalInstability { index: usize },
    /// NaN or infinite input value at `index`.
    NonFiniteValue { index: usize },
    /// Evaluation requested outside of the knot range.
    OutOfRange(f64),
    /// Sample `index` of a polyline overflowed to a non-finite value.
    NonFiniteSample { index: usize },
    /// Sampling resolution outside of `1..=MAX_RESOLUTION`.
    InvalidResolution(usize),
}

impl Display for SplineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplineError::InsufficientPoints { required, actual } => write!(
                f,
                "Error in Spline: at least {} points are required, got {}",
                required, actual
            ),
            SplineError::LengthMismatch { expected, actual } => write!(
                f,
                "Error in Spline: expected {} values, got {}",
                expected, actual
            ),
            SplineError::DegenerateInput { index } => write!(
                f,
                "Error in Spline: non-increasing spacing between points {} and {}",
                index.saturating_sub(1),
                index
            ),
            SplineError::NumericalInstability { index } => write!(
                f,
                "Error in Spline: numerical instability in moment system at index {}",
                index
            ),
            SplineError::NonFiniteValue { index } => {
                write!(f, "Error in Spline: value at index {} is not finite", index)
            }
            SplineError::NonFiniteSample { index } => {
                write!(f, "Error in Spline: sample {} is not finite", index)
            }
            SplineError::OutOfRange(x) => write!(f, "Error in Spline: {} is out of range", x),
            SplineError::InvalidResolution(resolution) => write!(
                f,
                "Error in Spline: resolution must be between 1 and {}, got {}",
                MAX_RESOLUTION,
                resolution
            ),
        }
    }
}

impl Error for SplineError {}
