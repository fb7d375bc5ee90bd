use nalgebra::Point2;

use crate::{
    error::SplineError,
    knot::Knot,
    series::{differences, weights},
    spline::{validate_finite, NaturalSpline, SegmentCursor},
};

/// Number of intervals the curve is sampled into by default.
pub const DEFAULT_RESOLUTION: usize = 3000;

/// Largest accepted sampling resolution.
pub const MAX_RESOLUTION: usize = 1 << 24;

/// Settings of [ParametricCurve::sample].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    resolution: usize,
}

impl SamplerConfig {
    /// Sampling into `resolution` equal parameter intervals, producing `resolution + 1` points.
    ///
    /// # Errors
    /// [SplineError::InvalidResolution] when `resolution` is 0 or above [MAX_RESOLUTION].
    pub fn new(resolution: usize) -> Result<Self, SplineError> {
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(SplineError::InvalidResolution(resolution));
        }
        Ok(SamplerConfig { resolution })
    }

    pub fn get_resolution(&self) -> usize {
        self.resolution
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

/// Normalized parameter of each knot, `t[k] = k / (n-1)`.
pub fn parameter_grid(size: usize) -> Vec<f64> {
    if size < 2 {
        return vec![0.0; size];
    }
    let last = (size - 1) as f64;
    (0..size).map(|k| k as f64 / last).collect()
}

/// Dense samples of a curve, stored as separate coordinate channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Polyline {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn get_xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn get_ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(x, y)| Point2::new(*x, *y))
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.xs, self.ys)
    }
}

/// Smooth curve through an ordered sequence of points: one natural spline per coordinate,
/// both over the same normalized parameter grid.
///
/// Parametrizing by knot number instead of by `x` lets the points come in any order.
#[derive(Debug, Clone)]
pub struct ParametricCurve {
    grid: Vec<f64>,
    x: NaturalSpline,
    y: NaturalSpline,
}

impl ParametricCurve {
    /// Builds the curve through `(xs[i], ys[i])`.
    ///
    /// # Errors
    /// - [SplineError::LengthMismatch] when the channels differ in length,
    /// - [SplineError::InsufficientPoints] for fewer than 2 points,
    /// - [SplineError::NonFiniteValue] for NaN or infinite coordinates,
    /// - [SplineError::DegenerateInput] for two consecutive coincident points.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::LengthMismatch {
                expected: xs.len(),
                actual: ys.len(),
            });
        }
        let size = xs.len();
        if size < 2 {
            return Err(SplineError::InsufficientPoints {
                required: 2,
                actual: size,
            });
        }
        validate_finite(xs)?;
        validate_finite(ys)?;
        if let Some(index) = (1..size).find(|i| {
            Knot::new(xs[*i], ys[*i]).coincides_with(&Knot::new(xs[*i - 1], ys[*i - 1]))
        }) {
            return Err(SplineError::DegenerateInput { index });
        }

        let grid = parameter_grid(size);
        let h = differences(&grid);
        let lambdas = weights(&h)?;

        let x = NaturalSpline::from_weights(&grid, xs, &h, &lambdas)?;
        let y = NaturalSpline::from_weights(&grid, ys, &h, &lambdas)?;

        log::debug!("built parametric curve through {} points", size);
        Ok(ParametricCurve { grid, x, y })
    }

    /// # Example
    /// ```
    /// use nifs3::{Knot, ParametricCurve};
    ///
    /// let knots = vec![Knot::new(0.0, 0.0), Knot::new(1.0, 1.0), Knot::new(2.0, 0.0)];
    /// let curve = ParametricCurve::from_knots(&knots).unwrap();
    ///
    /// assert_eq!(3, curve.get_knot_count());
    /// ```
    pub fn from_knots(knots: &[Knot]) -> Result<Self, SplineError> {
        let (xs, ys) = Knot::split_channels(knots);
        Self::new(&xs, &ys)
    }

    /// Point of the curve at parameter `u` in `[0, 1]`.
    ///
    /// # Errors
    /// [SplineError::OutOfRange] when `u` lies outside of `[0, 1]`.
    pub fn evaluate(&self, u: f64) -> Result<Point2<f64>, SplineError> {
        Ok(Point2::new(self.x.interpolate(u)?, self.y.interpolate(u)?))
    }

    /// Samples the curve at `u[k] = k / resolution` for `k = 0..=resolution`.
    ///
    /// Samples and knots are both ascending, so a single forward-only cursor finds the
    /// segment of every sample.
    ///
    /// # Errors
    /// [SplineError::NonFiniteSample] when a sample overflows, which takes coordinates
    /// close to `f64::MAX`.
    pub fn sample(&self, config: &SamplerConfig) -> Result<Polyline, SplineError> {
        let resolution = config.get_resolution();
        let mut xs = Vec::with_capacity(resolution + 1);
        let mut ys = Vec::with_capacity(resolution + 1);
        let mut cursor = SegmentCursor::new();

        for k in 0..=resolution {
            let u = k as f64 / resolution as f64;
            let index = cursor.advance(&self.grid, u);
            xs.push(self.x.segment_at(index).evaluate(u));
            ys.push(self.y.segment_at(index).evaluate(u));
        }
        if let Some(index) = first_non_finite(&xs, &ys) {
            return Err(SplineError::NonFiniteSample { index });
        }

        log::debug!(
            "sampled {} points over {} segments",
            resolution + 1,
            self.grid.len() - 1
        );
        Ok(Polyline { xs, ys })
    }

    pub fn get_parameter_grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn get_knot_count(&self) -> usize {
        self.grid.len()
    }

    pub fn get_x(&self) -> &NaturalSpline {
        &self.x
    }

    pub fn get_y(&self) -> &NaturalSpline {
        &self.y
    }
}

/// Samples the natural cubic curve through `(x[i], y[i])` at [DEFAULT_RESOLUTION] `+ 1`
/// evenly spaced parameter values and returns the sample coordinates.
///
/// # Errors
/// Same as [ParametricCurve::new] and [ParametricCurve::sample].
pub fn compute_spline(x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>), SplineError> {
    let curve = ParametricCurve::new(x, y)?;
    Ok(curve.sample(&SamplerConfig::default())?.into_parts())
}

fn first_non_finite(xs: &[f64], ys: &[f64]) -> Option<usize> {
    xs.iter()
        .zip(ys)
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
}
