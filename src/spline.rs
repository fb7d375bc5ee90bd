use nalgebra::DVector;

use crate::{
    error::SplineError,
    moments::solve_moments,
    segment::SplineSegment,
    series::{curvature_rhs, differences, weights},
};

/// Natural cubic spline of a single coordinate over strictly increasing knots.
///
/// The second derivative vanishes at both ends of the knot range.
#[derive(Debug, Clone)]
pub struct NaturalSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    moments: DVector<f64>,
    segments: Vec<SplineSegment>,
    is_knot_spacing_uniform: bool,
}

impl NaturalSpline {
    /// Builds the spline through `(knots[i], values[i])`.
    ///
    /// # Errors
    /// - [SplineError::LengthMismatch] when `knots` and `values` differ in length,
    /// - [SplineError::InsufficientPoints] for fewer than 2 knots,
    /// - [SplineError::NonFiniteValue] for NaN or infinite input,
    /// - [SplineError::DegenerateInput] when knots are not strictly increasing,
    /// - [SplineError::NumericalInstability] when the curvature or the moments overflow.
    pub fn new(knots: &[f64], values: &[f64]) -> Result<Self, SplineError> {
        validate_input(knots, values)?;

        let h = differences(knots);
        if let Some(index) = (1..h.len()).find(|i| h[*i] <= 0.0) {
            return Err(SplineError::DegenerateInput { index });
        }
        let lambdas = weights(&h)?;

        Self::from_weights(knots, values, &h, &lambdas)
    }

    /// Builds the spline from precomputed differences and weights of `knots`, which lets
    /// several coordinate channels over the same knots share them.
    pub(crate) fn from_weights(
        knots: &[f64],
        values: &[f64],
        h: &DVector<f64>,
        lambdas: &DVector<f64>,
    ) -> Result<Self, SplineError> {
        let d = curvature_rhs(knots, values)?;
        let moments = solve_moments(lambdas, &d)?;

        let segments = (1..knots.len())
            .map(|k| SplineSegment::new(k, knots, values, moments.as_slice()))
            .collect();

        log::debug!("built natural spline over {} knots", knots.len());

        Ok(NaturalSpline {
            knots: knots.to_vec(),
            values: values.to_vec(),
            moments,
            segments,
            is_knot_spacing_uniform: is_uniform(h),
        })
    }

    /// Evaluates the spline at `u`.
    ///
    /// # Errors
    /// [SplineError::OutOfRange] when `u` lies outside of the knot range.
    pub fn interpolate(&self, u: f64) -> Result<f64, SplineError> {
        let segment = self.segment_in_range(u)?;
        Ok(segment.evaluate(u))
    }

    /// Evaluates the spline at `u`, continuing the first or last cubic outside of the knot range.
    pub fn extrapolate(&self, u: f64) -> f64 {
        let last = self.segments.len();
        if u < self.knots[0] {
            self.segments[0].evaluate(u)
        } else if u > self.knots[last] {
            self.segments[last - 1].evaluate(u)
        } else {
            self.segment_at(self.find_segment_index(u)).evaluate(u)
        }
    }

    /// Evaluates the spline at every element of `us`. Ascending input is walked with a
    /// forward-only cursor; a step backwards falls back to a fresh lookup.
    ///
    /// # Errors
    /// [SplineError::OutOfRange] when any element lies outside of the knot range.
    pub fn batch_interpolate(&self, us: &[f64]) -> Result<Vec<f64>, SplineError> {
        if let Some(u) = us.iter().find(|u| !self.is_in_range(**u)) {
            return Err(SplineError::OutOfRange(*u));
        }

        let mut results = Vec::with_capacity(us.len());
        let mut cursor = SegmentCursor::new();

        for &u in us {
            if u < self.knots[cursor.get_index() - 1] {
                cursor = SegmentCursor::starting_at(self.find_segment_index(u));
            }
            let index = cursor.advance(&self.knots, u);
            results.push(self.segment_at(index).evaluate(u));
        }
        Ok(results)
    }

    /// First derivative of the spline at `u`.
    pub fn derivative(&self, u: f64) -> Result<f64, SplineError> {
        let segment = self.segment_in_range(u)?;
        Ok(segment.derivative(u))
    }

    /// Second derivative of the spline at `u`.
    pub fn second_derivative(&self, u: f64) -> Result<f64, SplineError> {
        let segment = self.segment_in_range(u)?;
        Ok(segment.second_derivative(u))
    }

    pub fn get_knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn get_values(&self) -> &[f64] {
        &self.values
    }

    /// Second derivatives at the knots. The first and the last are always zero.
    pub fn get_moments(&self) -> &DVector<f64> {
        &self.moments
    }

    pub fn get_segments(&self) -> &[SplineSegment] {
        &self.segments
    }

    /// Segment between knots `index - 1` and `index`, `None` unless `1 <= index <= n-1`.
    pub fn segment(&self, index: usize) -> Option<&SplineSegment> {
        index.checked_sub(1).and_then(|i| self.segments.get(i))
    }

    pub(crate) fn segment_at(&self, index: usize) -> &SplineSegment {
        &self.segments[index - 1]
    }

    fn segment_in_range(&self, u: f64) -> Result<&SplineSegment, SplineError> {
        if self.is_in_range(u) {
            Ok(self.segment_at(self.find_segment_index(u)))
        } else {
            Err(SplineError::OutOfRange(u))
        }
    }

    fn is_in_range(&self, u: f64) -> bool {
        self.knots[0] <= u && u <= self.knots[self.knots.len() - 1]
    }

    /// Smallest segment index `k` with `u <= knots[k]`, clamped to `1..=n-1`.
    fn find_segment_index(&self, u: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_segment_index_uniform(u)
        } else {
            self.find_segment_index_bisect(u)
        }
    }

    fn find_segment_index_bisect(&self, u: f64) -> usize {
        let mut min = 1;
        let mut max = self.knots.len() - 1;

        while min < max {
            let mid = (min + max) / 2;
            if u <= self.knots[mid] {
                max = mid;
            } else {
                min = mid + 1;
            }
        }
        min
    }

    fn find_segment_index_uniform(&self, u: f64) -> usize {
        let last = self.knots.len() - 1;
        let first_knot = self.knots[0];
        let relative_u = (u - first_knot) / (self.knots[last] - first_knot);

        let mut index = ((relative_u * last as f64).ceil().max(1.0) as usize).min(last);
        // rounding of the knots may put the guess one segment off
        while index > 1 && u <= self.knots[index - 1] {
            index -= 1;
        }
        while index < last && u > self.knots[index] {
            index += 1;
        }
        index
    }
}

/// Forward-only position in the segment list of a spline, used to walk ascending
/// abscissae in amortized constant time per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCursor {
    index: usize,
}

impl SegmentCursor {
    /// Cursor on the first segment.
    pub fn new() -> Self {
        SegmentCursor { index: 1 }
    }

    pub(crate) fn starting_at(index: usize) -> Self {
        SegmentCursor { index: index.max(1) }
    }

    /// Moves past every knot smaller than `u` and returns the segment to evaluate `u` on.
    /// The cursor never moves backwards and never leaves the last segment.
    pub fn advance(&mut self, knots: &[f64], u: f64) -> usize {
        let last = knots.len().saturating_sub(1);
        while self.index < last && u > knots[self.index] {
            self.index += 1;
        }
        self.index
    }

    pub fn get_index(&self) -> usize {
        self.index
    }
}

impl Default for SegmentCursor {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_input(knots: &[f64], values: &[f64]) -> Result<(), SplineError> {
    if knots.len() != values.len() {
        return Err(SplineError::LengthMismatch {
            expected: knots.len(),
            actual: values.len(),
        });
    }
    if knots.len() < 2 {
        return Err(SplineError::InsufficientPoints {
            required: 2,
            actual: knots.len(),
        });
    }
    validate_finite(knots)?;
    validate_finite(values)
}

pub(crate) fn validate_finite(values: &[f64]) -> Result<(), SplineError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SplineError::NonFiniteValue { index }),
        None => Ok(()),
    }
}

fn is_uniform(h: &DVector<f64>) -> bool {
    if h.len() < 2 {
        return false;
    }
    let reference = h[1];
    h.iter()
        .skip(2)
        .all(|spacing| (spacing - reference).abs() <= 1e-9 * reference.abs())
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_spline(seed: u64, size: usize) -> NaturalSpline {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut knots = vec![rng.gen_range(-5.0..5.0)];
        for _ in 1..size {
            let last = knots[knots.len() - 1];
            knots.push(last + rng.gen_range(0.05..1.5));
        }
        let values: Vec<f64> = knots.iter().map(|_| rng.gen_range(-10.0..10.0)).collect();
        NaturalSpline::new(&knots, &values).unwrap()
    }

    #[test]
    fn passes_through_knots() {
        let spline = random_spline(3, 12);

        assert!(!spline.is_knot_spacing_uniform);
        for (knot, value) in spline.get_knots().iter().zip(spline.get_values()) {
            assert_approx_eq!(*value, spline.interpolate(*knot).unwrap(), 1e-9);
        }
    }

    #[test]
    fn continuous_up_to_second_derivative() {
        let spline = random_spline(11, 15);
        let knots = spline.get_knots();

        for k in 1..knots.len() - 1 {
            let left = spline.segment(k).unwrap();
            let right = spline.segment(k + 1).unwrap();
            let u = knots[k];

            assert_approx_eq!(left.evaluate(u), right.evaluate(u), 1e-9);
            assert_approx_eq!(left.derivative(u), right.derivative(u), 1e-6);
            assert_approx_eq!(left.second_derivative(u), right.second_derivative(u), 1e-6);
        }
    }

    #[test]
    fn natural_boundary() {
        let spline = random_spline(5, 8);
        let knots = spline.get_knots();
        let moments = spline.get_moments();

        assert_eq!(0.0, moments[0]);
        assert_eq!(0.0, moments[moments.len() - 1]);
        assert_approx_eq!(0.0, spline.second_derivative(knots[0]).unwrap(), 1e-9);
        assert_approx_eq!(
            0.0,
            spline.second_derivative(knots[knots.len() - 1]).unwrap(),
            1e-9
        );
    }

    #[test]
    fn out_of_range() {
        let spline = NaturalSpline::new(&[0.0, 1.0, 2.0], &[4.0, 2.0, 6.0]).unwrap();

        assert_eq!(Err(SplineError::OutOfRange(3.0)), spline.interpolate(3.0));
        assert_eq!(Err(SplineError::OutOfRange(-0.5)), spline.derivative(-0.5));
        assert!(spline.batch_interpolate(&[0.0, 1.0, 2.5]).is_err());
    }

    #[test]
    fn three_uniform_knots() {
        // moments [0, 9, 0]
        let spline = NaturalSpline::new(&[0.0, 1.0, 2.0], &[4.0, 2.0, 6.0]).unwrap();

        assert!(spline.is_knot_spacing_uniform);
        assert_approx_eq!(4.0, spline.interpolate(0.0).unwrap());
        assert_approx_eq!(2.0, spline.interpolate(1.0).unwrap());
        assert_approx_eq!(6.0, spline.interpolate(2.0).unwrap());
        assert_approx_eq!(2.4375, spline.interpolate(0.5).unwrap());
        assert_approx_eq!(3.4375, spline.interpolate(1.5).unwrap());
        assert_approx_eq!(9.0, spline.second_derivative(1.0).unwrap());
    }

    #[test]
    fn extrapolates_boundary_cubics() {
        let spline = NaturalSpline::new(&[0.0, 1.0, 2.0], &[4.0, 2.0, 6.0]).unwrap();
        let first = *spline.segment(1).unwrap();
        let last = *spline.segment(2).unwrap();

        assert_approx_eq!(first.evaluate(-1.0), spline.extrapolate(-1.0));
        assert_approx_eq!(last.evaluate(3.0), spline.extrapolate(3.0));
        assert_approx_eq!(spline.interpolate(0.7).unwrap(), spline.extrapolate(0.7));
    }

    #[test]
    fn batch_matches_single_evaluation() {
        let spline = random_spline(23, 10);
        let knots = spline.get_knots();
        let first = knots[0];
        let last = knots[knots.len() - 1];

        let mut us: Vec<f64> = (0..=200)
            .map(|i| first + (last - first) * i as f64 / 200.0)
            .collect();
        // a step backwards restarts the cursor
        us.push(first);
        us.push(0.5 * (first + last));

        let result = spline.batch_interpolate(&us).unwrap();

        assert_eq!(us.len(), result.len());
        for (u, value) in us.iter().zip(result) {
            assert_approx_eq!(spline.interpolate(*u).unwrap(), value, 1e-12);
        }
    }

    #[test]
    fn uniform_and_bisect_lookup_agree() {
        let knots: Vec<f64> = (0..8).map(|k| k as f64 / 7.0).collect();
        let values: Vec<f64> = knots.iter().map(|t| (3.0 * t).sin()).collect();
        let spline = NaturalSpline::new(&knots, &values).unwrap();

        assert!(spline.is_knot_spacing_uniform);
        for i in 0..=700 {
            let u = i as f64 / 700.0;
            assert_eq!(
                spline.find_segment_index_bisect(u),
                spline.find_segment_index_uniform(u)
            );
        }
        for (k, knot) in knots.iter().enumerate().skip(1) {
            assert_eq!(k, spline.find_segment_index(*knot));
        }
        assert_eq!(1, spline.find_segment_index(0.0));
    }

    #[test]
    fn cursor_is_monotone() {
        let knots = [0.0, 0.25, 0.5, 0.75, 1.0];
        let mut cursor = SegmentCursor::new();

        assert_eq!(1, cursor.advance(&knots, 0.0));
        assert_eq!(1, cursor.advance(&knots, 0.25));
        assert_eq!(2, cursor.advance(&knots, 0.3));
        assert_eq!(4, cursor.advance(&knots, 0.9));
        // never moves back
        assert_eq!(4, cursor.advance(&knots, 0.1));
        // never leaves the last segment
        assert_eq!(4, cursor.advance(&knots, 7.0));
    }

    #[test]
    fn segment_lookup_bounds() {
        let spline = NaturalSpline::new(&[0.0, 1.0, 2.0], &[4.0, 2.0, 6.0]).unwrap();

        assert!(spline.segment(0).is_none());
        assert_eq!(1, spline.segment(1).unwrap().get_index());
        assert_eq!(2, spline.segment(2).unwrap().get_index());
        assert!(spline.segment(3).is_none());
    }

    #[test]
    fn two_knots_are_a_line() {
        let spline = NaturalSpline::new(&[1.0, 3.0], &[2.0, 6.0]).unwrap();

        assert_approx_eq!(4.0, spline.interpolate(2.0).unwrap());
        assert_approx_eq!(2.0, spline.derivative(1.5).unwrap());
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            Err(SplineError::LengthMismatch { expected: 3, actual: 2 }),
            NaturalSpline::new(&[0.0, 1.0, 2.0], &[1.0, 2.0]).map(|_| ())
        );
        assert_eq!(
            Err(SplineError::InsufficientPoints { required: 2, actual: 1 }),
            NaturalSpline::new(&[0.0], &[1.0]).map(|_| ())
        );
        assert_eq!(
            Err(SplineError::NonFiniteValue { index: 1 }),
            NaturalSpline::new(&[0.0, 1.0, 2.0], &[1.0, f64::NAN, 2.0]).map(|_| ())
        );
        assert_eq!(
            Err(SplineError::DegenerateInput { index: 1 }),
            NaturalSpline::new(&[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]).map(|_| ())
        );
        assert_eq!(
            Err(SplineError::DegenerateInput { index: 2 }),
            NaturalSpline::new(&[0.0, 1.0, 0.5], &[1.0, 2.0, 3.0]).map(|_| ())
        );
    }
}
