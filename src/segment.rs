/// One cubic piece of a natural spline, valid between knots `k-1` and `k`.
///
/// The record only holds the local geometry; evaluation is a pure function of it.
/// Evaluating outside `[start, end]` extrapolates the cubic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSegment {
    index: usize,
    start: f64,
    end: f64,
    start_value: f64,
    end_value: f64,
    start_moment: f64,
    end_moment: f64,
}

impl SplineSegment {
    /// Builds segment `index` (1-based) from the knots, values and moments of the whole spline.
    pub(crate) fn new(index: usize, knots: &[f64], values: &[f64], moments: &[f64]) -> Self {
        SplineSegment {
            index,
            start: knots[index - 1],
            end: knots[index],
            start_value: values[index - 1],
            end_value: values[index],
            start_moment: moments[index - 1],
            end_moment: moments[index],
        }
    }

    /// Value of the segment at `u`:
    ///
    /// ```text
    /// s(u) = 1/h · [ m0/6·(t1-u)³ + m1/6·(u-t0)³
    ///              + (v0 - m0·h²/6)·(t1-u) + (v1 - m1·h²/6)·(u-t0) ]
    /// ```
    pub fn evaluate(&self, u: f64) -> f64 {
        let h = self.width();
        let to_end = self.end - u;
        let from_start = u - self.start;

        (1.0 / h)
            * ((1.0 / 6.0) * self.start_moment * to_end.powi(3)
                + (1.0 / 6.0) * self.end_moment * from_start.powi(3)
                + (self.start_value - (1.0 / 6.0) * self.start_moment * h.powi(2)) * to_end
                + (self.end_value - (1.0 / 6.0) * self.end_moment * h.powi(2)) * from_start)
    }

    /// First derivative of the segment at `u`.
    pub fn derivative(&self, u: f64) -> f64 {
        let h = self.width();
        let to_end = self.end - u;
        let from_start = u - self.start;

        (1.0 / h)
            * (-0.5 * self.start_moment * to_end.powi(2)
                + 0.5 * self.end_moment * from_start.powi(2)
                - (self.start_value - (1.0 / 6.0) * self.start_moment * h.powi(2))
                + (self.end_value - (1.0 / 6.0) * self.end_moment * h.powi(2)))
    }

    /// Second derivative of the segment at `u`, linear between the two moments.
    pub fn second_derivative(&self, u: f64) -> f64 {
        (1.0 / self.width())
            * (self.start_moment * (self.end - u) + self.end_moment * (u - self.start))
    }

    pub fn get_index(&self) -> usize {
        self.index
    }

    pub fn get_start(&self) -> f64 {
        self.start
    }

    pub fn get_end(&self) -> f64 {
        self.end
    }

    pub fn contains(&self, u: f64) -> bool {
        self.start <= u && u <= self.end
    }

    fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn zig_zag_segment(index: usize) -> SplineSegment {
        let knots = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        let values = [0.0, 1.0, 0.0, 1.0];
        let moments = [0.0, -36.0, 36.0, 0.0];
        SplineSegment::new(index, &knots, &values, &moments)
    }

    #[test]
    fn interpolates_bounding_values() {
        for index in 1..=3 {
            let segment = zig_zag_segment(index);
            let expected_start = [0.0, 1.0, 0.0, 1.0][index - 1];
            let expected_end = [0.0, 1.0, 0.0, 1.0][index];

            assert_approx_eq!(expected_start, segment.evaluate(segment.get_start()), 1e-12);
            assert_approx_eq!(expected_end, segment.evaluate(segment.get_end()), 1e-12);
        }
    }

    #[test]
    fn symmetric_middle_segment() {
        let segment = zig_zag_segment(2);

        assert_eq!(2, segment.get_index());
        assert_approx_eq!(0.5, segment.evaluate(0.5), 1e-12);
        assert!(segment.contains(0.5));
        assert!(!segment.contains(0.9));
    }

    #[test]
    fn second_derivative_matches_moments() {
        let segment = zig_zag_segment(2);

        assert_approx_eq!(-36.0, segment.second_derivative(1.0 / 3.0), 1e-9);
        assert_approx_eq!(36.0, segment.second_derivative(2.0 / 3.0), 1e-9);
        assert_approx_eq!(0.0, segment.second_derivative(0.5), 1e-9);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let segment = zig_zag_segment(1);
        let step = 1e-6;

        for u in [0.05, 0.15, 0.3] {
            let numeric = (segment.evaluate(u + step) - segment.evaluate(u - step)) / (2.0 * step);
            assert_approx_eq!(numeric, segment.derivative(u), 1e-5);
        }
    }

    #[test]
    fn zero_moments_give_straight_line() {
        let segment = SplineSegment::new(1, &[2.0, 4.0], &[1.0, 5.0], &[0.0, 0.0]);

        assert_approx_eq!(3.0, segment.evaluate(3.0));
        assert_approx_eq!(2.0, segment.derivative(2.5));
        assert_approx_eq!(0.0, segment.second_derivative(3.5));
    }
}
