use nalgebra::Point2;

/// Knot represents a control point through which the curve passes. Knots are visited in
/// the order they are given, so `x` does not need to be increasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    x: f64,
    y: f64,
}

impl Knot {
    /// # Example
    /// ```
    /// use nifs3::Knot;
    ///
    /// let knot = Knot::new(1.0, 2.0);
    /// assert_eq!(1.0, knot.get_x());
    /// assert_eq!(2.0, knot.get_y());
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    /// Both coordinates are equal to the ones of `other`.
    pub fn coincides_with(&self, other: &Knot) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Splits knots into separate `x` and `y` coordinate channels.
    pub fn split_channels(knots: &[Knot]) -> (Vec<f64>, Vec<f64>) {
        knots.iter().map(|k| (k.x, k.y)).unzip()
    }
}

impl From<(f64, f64)> for Knot {
    fn from((x, y): (f64, f64)) -> Self {
        Knot { x, y }
    }
}

impl From<Point2<f64>> for Knot {
    fn from(point: Point2<f64>) -> Self {
        Knot { x: point.x, y: point.y }
    }
}

impl From<Knot> for Point2<f64> {
    fn from(knot: Knot) -> Self {
        Point2::new(knot.x, knot.y)
    }
}
