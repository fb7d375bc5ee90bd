//! Natural cubic spline through an ordered sequence of 2-D points, resampled into a dense
//! polyline. Each coordinate is interpolated over the normalized knot number
//! `t[k] = k / (n-1)`, so the points may come in any order.
//!
//! # Example
//! ```
//! use nifs3::compute_spline;
//! use assert_approx_eq::assert_approx_eq;
//!
//! let (sx, sy) = compute_spline(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0]).unwrap();
//!
//! assert_eq!(3001, sx.len());
//! assert_approx_eq!(3.0, sx[3000], 1e-9);
//! assert_approx_eq!(1.0, sy[1000], 1e-9);
//! assert_approx_eq!(0.0, sy[2000], 1e-9);
//! ```

mod curve;
mod error;
mod knot;
mod moments;
mod segment;
mod series;
mod spline;

pub use curve::{
    compute_spline, parameter_grid, ParametricCurve, Polyline, SamplerConfig, DEFAULT_RESOLUTION,
    MAX_RESOLUTION,
};
pub use error::SplineError;
pub use knot::Knot;
pub use moments::solve_moments;
pub use segment::SplineSegment;
pub use series::{curvature_rhs, differences, weights};
pub use spline::{NaturalSpline, SegmentCursor};
