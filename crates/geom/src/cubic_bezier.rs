//! Cubic bézier segments and their arc length.

use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::{Point, Vector};
use arrayvec::ArrayVec;

use core::ops::Range;

/// Maximum number of times a curve is halved while measuring it.
const MAX_SUBDIVISION_DEPTH: u32 = 16;
const SUBDIVISION_STACK_SIZE: usize = MAX_SUBDIVISION_DEPTH as usize + 2;

/// Abscissas of the 5-point Gauss-Legendre rule on [-1, 1].
const GAUSS_LEGENDRE_X: [f64; 5] = [
    0.0,
    -0.538_469_310_105_683_1,
    0.538_469_310_105_683_1,
    -0.906_179_845_938_664_0,
    0.906_179_845_938_664_0,
];

/// Weights of the 5-point Gauss-Legendre rule.
const GAUSS_LEGENDRE_W: [f64; 5] = [
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
    0.236_926_885_056_189_1,
];

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    #[inline]
    fn derivative_coefficients(&self, t: S) -> (S, S, S, S) {
        let t2 = t * t;
        (
            -S::THREE * t2 + S::SIX * t - S::THREE,
            S::NINE * t2 - S::TWELVE * t + S::THREE,
            -S::NINE * t2 + S::SIX * t,
            S::THREE * t2,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let to = self.sample(t1);

        let dt = (t1 - t0) / S::THREE;
        let ctrl1 = from + self.derivative(t0) * dt;
        let ctrl2 = to - self.derivative(t1) * dt;

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Sum of the lengths of the three edges of the control polygon.
    ///
    /// This is an upper bound of the arc length.
    pub fn control_polygon_length(&self) -> S {
        (self.ctrl1 - self.from).length()
            + (self.ctrl2 - self.ctrl1).length()
            + (self.to - self.ctrl2).length()
    }

    /// Returns true if all control points are within `tolerance` of the start point.
    pub fn is_a_point(&self, tolerance: S) -> bool {
        let tolerance_squared = tolerance * tolerance;
        (self.from - self.to).square_length() <= tolerance_squared
            && (self.from - self.ctrl1).square_length() <= tolerance_squared
            && (self.from - self.ctrl2).square_length() <= tolerance_squared
    }

    /// Arc length between two parameter values, integrating the derivative magnitude
    /// with a 5-point Gauss-Legendre rule.
    ///
    /// This is only accurate when the curve is reasonably flat between `t0` and `t1`,
    /// which is the case for the pieces produced by `for_each_length_piece`.
    pub fn length_between(&self, t0: S, t1: S) -> S {
        let half = (t1 - t0) * S::HALF;
        let mid = (t1 + t0) * S::HALF;
        let mut sum = S::ZERO;
        for i in 0..5 {
            let t = mid + half * S::value(GAUSS_LEGENDRE_X[i]);
            sum += S::value(GAUSS_LEGENDRE_W[i]) * self.derivative(t).length();
        }

        (sum * half).abs()
    }

    /// Splits the curve into pieces whose control polygon and chord lengths agree
    /// within the relative `tolerance`, and invokes the callback with the parameter
    /// range and arc length of each piece, from the start of the curve to its end.
    pub fn for_each_length_piece<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(Range<S>, S),
    {
        // Ranges are pushed right half first so that they pop in curve order.
        let mut stack: ArrayVec<(S, S, u32), SUBDIVISION_STACK_SIZE> = ArrayVec::new();
        stack.push((S::ZERO, S::ONE, 0));

        while let Some((t0, t1, depth)) = stack.pop() {
            let piece = self.split_range(t0..t1);
            let polygon = piece.control_polygon_length();
            let chord = (piece.to - piece.from).length();

            let flat_enough = polygon - chord <= tolerance * polygon;
            if flat_enough || depth >= MAX_SUBDIVISION_DEPTH {
                callback(t0..t1, self.length_between(t0, t1));
                continue;
            }

            let mid = (t0 + t1) * S::HALF;
            stack.push((mid, t1, depth + 1));
            stack.push((t0, mid, depth + 1));
        }
    }

    /// Compute the arc length of the segment.
    ///
    /// See `for_each_length_piece` for the meaning of the relative tolerance.
    pub fn approximate_length(&self, tolerance: S) -> S {
        let mut length = S::ZERO;
        self.for_each_length_piece(tolerance, &mut |_, piece_length| {
            length += piece_length;
        });

        length
    }
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
fn polyline_length(curve: &CubicBezierSegment<f64>, steps: u32) -> f64 {
    let mut length = 0.0;
    let mut prev = curve.from;
    for i in 1..=steps {
        let p = curve.sample(i as f64 / steps as f64);
        length += (p - prev).length();
        prev = p;
    }

    length
}

#[test]
fn derivatives() {
    use crate::point;

    let c1 = CubicBezierSegment {
        from: point(1.0, 1.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(2.0, 1.0),
        to: point(2.0, 2.0),
    };

    assert_eq!(c1.derivative(0.0).x, 0.0);
    assert_eq!(c1.derivative(1.0).x, 0.0);
    assert_eq!(c1.derivative(0.5).y, 0.0);
}

#[test]
fn split_range_matches_sample() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(10.0, 30.0),
        ctrl2: point(40.0, -20.0),
        to: point(50.0, 10.0),
    };

    let sub = curve.split_range(0.2..0.7);
    for i in 0..=10 {
        let s = i as f64 / 10.0;
        let expected = curve.sample(0.2 + 0.5 * s);
        assert!((sub.sample(s) - expected).length() < 1e-9);
    }

    let (a, b) = curve.split(0.3);
    assert!((a.to - curve.sample(0.3)).length() < 1e-12);
    assert_eq!(a.to, b.from);
}

#[test]
fn straight_cubic_length() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 0.0),
        to: point(3.0, 0.0),
    };

    let mut pieces = 0;
    curve.for_each_length_piece(1e-4, &mut |_, _| pieces += 1);
    assert_eq!(pieces, 1);
    assert!((curve.approximate_length(1e-4) - 3.0).abs() < 1e-9);
}

#[test]
fn curved_cubic_length() {
    use crate::point;

    // Usual approximation of a quarter of the unit circle.
    let k = 0.552_284_749_8;
    let quarter = CubicBezierSegment {
        from: point(1.0f64, 0.0),
        ctrl1: point(1.0, k),
        ctrl2: point(k, 1.0),
        to: point(0.0, 1.0),
    };

    let reference = polyline_length(&quarter, 100_000);
    assert!((quarter.approximate_length(1e-4) - reference).abs() < 1e-6);
    assert!((quarter.approximate_length(1e-4) - core::f64::consts::FRAC_PI_2).abs() < 1e-3);

    let wavy = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(100.0, 200.0),
        ctrl2: point(-50.0, 200.0),
        to: point(80.0, -30.0),
    };

    let reference = polyline_length(&wavy, 200_000);
    assert!((wavy.approximate_length(1e-4) - reference).abs() < 1e-4 * reference);
}

#[test]
fn length_pieces_are_contiguous() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(0.0, 100.0),
        ctrl2: point(100.0, 100.0),
        to: point(100.0, 0.0),
    };

    let mut prev_end = 0.0;
    let mut total = 0.0;
    curve.for_each_length_piece(1e-4, &mut |range, length| {
        assert_eq!(range.start, prev_end);
        assert!(range.end > range.start);
        assert!(length >= 0.0);
        prev_end = range.end;
        total += length;
    });

    assert_eq!(prev_end, 1.0);
    assert!((total - curve.approximate_length(1e-4)).abs() < 1e-12);
}

#[test]
fn degenerate_cubic() {
    use crate::point;

    let p = point(3.0f64, 4.0);
    let curve = CubicBezierSegment {
        from: p,
        ctrl1: p,
        ctrl2: p,
        to: p,
    };

    assert!(curve.is_a_point(1e-9));
    assert_eq!(curve.approximate_length(1e-4), 0.0);
    assert_eq!(curve.derivative(0.5).length(), 0.0);
}
