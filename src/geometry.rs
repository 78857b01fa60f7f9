//! Straight segment algebra used to match bend notes and classify parts
//!
//! Slopes and intercepts are rounded to four decimal places so that lines
//! drawn from slightly noisy coordinates still compare equal. Vertical
//! segments have no slope; they report `f64::NAN` and every predicate treats
//! them as a separate case before touching the slope.

use crate::types::Vector2;
use std::fmt;

/// Absolute tolerance for slope comparisons
pub const EPSILON: f64 = 1e-5;

/// Compare two values within [`EPSILON`]
pub fn is_equal(a: f64, b: f64) -> bool {
    (b - a).abs() <= EPSILON
}

/// Round to four decimal places, ties to even
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// A straight line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vector2,
    pub end: Vector2,
}

impl Segment {
    /// Create a segment between two points
    pub const fn new(start: Vector2, end: Vector2) -> Self {
        Segment { start, end }
    }

    /// Create a segment from coordinates
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Segment::new(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    /// Same segment with its endpoints swapped
    pub fn reversed(&self) -> Self {
        Segment::new(self.end, self.start)
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    /// Both endpoints coincide
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Orientation from start to end, in `[0, 2π)`
    pub fn angle(&self) -> f64 {
        self.start.angle_to(&self.end)
    }

    pub fn midpoint(&self) -> Vector2 {
        (self.start + self.end) * 0.5
    }

    /// Endpoints ordered by x then y, so derived values ignore direction
    fn canonical(&self) -> (Vector2, Vector2) {
        let (a, b) = (self.start, self.end);
        if (a.x, a.y) <= (b.x, b.y) {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Slope rounded to four decimals, NaN for vertical segments
    pub fn slope(&self) -> f64 {
        if self.is_vertical() {
            return f64::NAN;
        }
        let (p1, p2) = self.canonical();
        round4((p2.y - p1.y) / (p2.x - p1.x))
    }

    /// Y intercept (`b` in `y = mx + b`) rounded to four decimals, NaN for
    /// vertical segments
    pub fn y_intercept(&self) -> f64 {
        if self.is_vertical() {
            return f64::NAN;
        }
        let (p1, _) = self.canonical();
        round4(p1.y - self.slope() * p1.x)
    }

    /// Point on the segment closest to `point`
    ///
    /// The projection parameter is clamped to `[0, 1]`, so the result never
    /// leaves the segment. A degenerate segment returns its start point.
    pub fn closest_point(&self, point: Vector2) -> Vector2 {
        let d = self.end - self.start;
        let length_squared = d.length_squared();
        if length_squared == 0.0 {
            return self.start;
        }

        let t = (point - self.start).dot(&d) / length_squared;
        if t <= 0.0 {
            self.start
        } else if t >= 1.0 {
            self.end
        } else {
            self.start + d * t
        }
    }

    /// Distance from `point` to the closest point of the segment
    pub fn distance_to(&self, point: Vector2) -> f64 {
        point.distance(&self.closest_point(point))
    }

    pub fn is_parallel_to(&self, other: &Segment) -> bool {
        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => is_equal(self.slope(), other.slope()),
        }
    }

    pub fn is_perpendicular_to(&self, other: &Segment) -> bool {
        if self.is_vertical() {
            return other.is_horizontal();
        }
        if other.is_vertical() {
            return self.is_horizontal();
        }
        is_equal(self.slope(), -1.0 / other.slope())
    }

    /// Both segments lie on the same infinite line
    pub fn is_collinear_to(&self, other: &Segment) -> bool {
        if self.is_vertical() || other.is_vertical() {
            return self.is_vertical() && other.is_vertical() && self.start.x == other.start.x;
        }
        self.y_intercept() == other.y_intercept() && self.slope() == other.slope()
    }

    /// Endpoints are exactly equal, in order
    pub fn same_endpoints(&self, other: &Segment) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vertical_and_horizontal() {
        let v = Segment::from_coords(2.0, 0.0, 2.0, 5.0);
        let h = Segment::from_coords(0.0, 1.0, 4.0, 1.0);
        assert!(v.is_vertical());
        assert!(!v.is_horizontal());
        assert!(h.is_horizontal());
        assert!(v.slope().is_nan());
        assert!(v.y_intercept().is_nan());
        assert_eq!(h.slope(), 0.0);
        assert_eq!(h.y_intercept(), 1.0);
    }

    #[test]
    fn test_slope_is_rounded() {
        let s = Segment::from_coords(0.0, 0.0, 3.0, 1.0);
        assert_eq!(s.slope(), 0.3333);
        let s = Segment::from_coords(0.0, 0.0, 3.0, 2.0);
        assert_eq!(s.slope(), 0.6667);
    }

    #[test]
    fn test_slope_and_intercept_ignore_direction() {
        let s = Segment::from_coords(1.0, 3.0, 4.0, 7.5);
        assert_eq!(s.slope(), s.reversed().slope());
        assert_eq!(s.y_intercept(), s.reversed().y_intercept());
    }

    #[test]
    fn test_closest_point_inside() {
        let s = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        assert_eq!(s.closest_point(Vector2::new(4.0, 3.0)), Vector2::new(4.0, 0.0));
        assert_eq!(s.distance_to(Vector2::new(4.0, 3.0)), 3.0);
    }

    #[test]
    fn test_closest_point_is_clamped() {
        let s = Segment::from_coords(0.0, 0.0, 10.0, 0.0);
        assert_eq!(s.closest_point(Vector2::new(-5.0, 2.0)), s.start);
        assert_eq!(s.closest_point(Vector2::new(15.0, -2.0)), s.end);
        assert_eq!(s.distance_to(Vector2::new(13.0, 4.0)), 5.0);
    }

    #[test]
    fn test_closest_point_degenerate() {
        let s = Segment::from_coords(1.0, 1.0, 1.0, 1.0);
        assert!(s.is_degenerate());
        assert_eq!(s.closest_point(Vector2::new(5.0, 5.0)), Vector2::new(1.0, 1.0));
    }

    #[test]
    fn test_two_verticals_are_parallel() {
        let a = Segment::from_coords(0.0, 0.0, 0.0, 5.0);
        let b = Segment::from_coords(3.0, 9.0, 3.0, -1.0);
        assert!(a.is_parallel_to(&b));
    }

    #[test]
    fn test_vertical_never_parallel_to_sloped() {
        let a = Segment::from_coords(0.0, 0.0, 0.0, 5.0);
        let b = Segment::from_coords(0.0, 0.0, 5.0, 5.0);
        assert!(!a.is_parallel_to(&b));
        assert!(!b.is_parallel_to(&a));
    }

    #[test]
    fn test_parallel_sloped() {
        let a = Segment::from_coords(0.0, 0.0, 2.0, 1.0);
        let b = Segment::from_coords(0.0, 3.0, 4.0, 5.0);
        assert!(a.is_parallel_to(&b));
    }

    #[test]
    fn test_vertical_horizontal_perpendicular() {
        let v = Segment::from_coords(0.0, 0.0, 0.0, 5.0);
        let h = Segment::from_coords(1.0, 1.0, 6.0, 1.0);
        assert!(v.is_perpendicular_to(&h));
        assert!(h.is_perpendicular_to(&v));
        assert!(!v.is_perpendicular_to(&v));
    }

    #[test]
    fn test_sloped_perpendicular() {
        let a = Segment::from_coords(0.0, 0.0, 1.0, 1.0);
        let b = Segment::from_coords(0.0, 0.0, 1.0, -1.0);
        let c = Segment::from_coords(0.0, 0.0, 2.0, 1.0);
        assert!(a.is_perpendicular_to(&b));
        assert!(!a.is_perpendicular_to(&c));
    }

    #[test]
    fn test_collinear() {
        let a = Segment::from_coords(0.0, 0.0, 2.0, 2.0);
        let b = Segment::from_coords(3.0, 3.0, 5.0, 5.0);
        let c = Segment::from_coords(0.0, 1.0, 2.0, 3.0);
        assert!(a.is_collinear_to(&b));
        assert!(!a.is_collinear_to(&c));
    }

    #[test]
    fn test_collinear_verticals() {
        let a = Segment::from_coords(4.0, 0.0, 4.0, 2.0);
        let b = Segment::from_coords(4.0, 7.0, 4.0, 9.0);
        let c = Segment::from_coords(5.0, 0.0, 5.0, 2.0);
        let d = Segment::from_coords(4.0, 0.0, 6.0, 2.0);
        assert!(a.is_collinear_to(&b));
        assert!(!a.is_collinear_to(&c));
        assert!(!a.is_collinear_to(&d));
    }

    #[test]
    fn test_same_endpoints() {
        let a = Segment::from_coords(0.0, 0.0, 1.0, 0.0);
        assert!(a.same_endpoints(&Segment::from_coords(0.0, 0.0, 1.0, 0.0)));
        assert!(!a.same_endpoints(&a.reversed()));
    }

    fn coord() -> impl Strategy<Value = f64> {
        -1000.0..1000.0f64
    }

    proptest! {
        #[test]
        fn prop_slope_intercept_swap_invariant(x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord()) {
            prop_assume!(x1 != x2);
            let s = Segment::from_coords(x1, y1, x2, y2);
            prop_assert_eq!(s.slope(), s.reversed().slope());
            prop_assert_eq!(s.y_intercept(), s.reversed().y_intercept());
        }

        #[test]
        fn prop_closest_point_stays_within_bounds(
            x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
            px in coord(), py in coord(),
        ) {
            let s = Segment::from_coords(x1, y1, x2, y2);
            let p = s.closest_point(Vector2::new(px, py));
            let tol = 1e-9;
            prop_assert!(p.x >= x1.min(x2) - tol && p.x <= x1.max(x2) + tol);
            prop_assert!(p.y >= y1.min(y2) - tol && p.y <= y1.max(y2) + tol);
        }

        #[test]
        fn prop_verticals_always_parallel(x1 in coord(), x2 in coord(), a in coord(), b in coord(), c in coord(), d in coord()) {
            let s1 = Segment::from_coords(x1, a, x1, b);
            let s2 = Segment::from_coords(x2, c, x2, d);
            prop_assert!(s1.is_parallel_to(&s2));
        }
    }
}
