use crate::scalar::Scalar;
use crate::{Point, Vector};

use core::ops::Range;

/// Common APIs to segment types.
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Sample the derivative at t (expecting t between 0 and 1).
    fn derivative(&self, t: Self::Scalar) -> Vector<Self::Scalar>;

    /// Split this curve into two sub-curves.
    fn split(&self, t: Self::Scalar) -> (Self, Self);

    /// Return the curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    fn split_range(&self, t_range: Range<Self::Scalar>) -> Self;

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;

    /// Compute the arc length of the segment.
    ///
    /// The tolerance is relative to the length of the measured pieces, see
    /// `CubicBezierSegment::approximate_length`. Line segments ignore it.
    fn approximate_length(&self, tolerance: Self::Scalar) -> Self::Scalar;

    /// Compute the arc length of the sub-curve between two parameter values.
    fn length_between(&self, t0: Self::Scalar, t1: Self::Scalar) -> Self::Scalar;

    /// Splits the curve into consecutive pieces that are straight enough for the
    /// given relative tolerance, invoking the callback with the parameter range and
    /// arc length of each piece, in order.
    ///
    /// The end of the last range is guaranteed to be equal to `1.0`.
    fn for_each_length_piece(
        &self,
        tolerance: Self::Scalar,
        callback: &mut dyn FnMut(Range<Self::Scalar>, Self::Scalar),
    );
}

macro_rules! impl_segment {
    ($S:ty) => {
        type Scalar = $S;
        fn from(&self) -> Point<$S> {
            self.from()
        }
        fn to(&self) -> Point<$S> {
            self.to()
        }
        fn sample(&self, t: $S) -> Point<$S> {
            self.sample(t)
        }
        fn derivative(&self, t: $S) -> Vector<$S> {
            self.derivative(t)
        }
        fn split(&self, t: $S) -> (Self, Self) {
            self.split(t)
        }
        fn split_range(&self, t_range: Range<$S>) -> Self {
            self.split_range(t_range)
        }
        fn flip(&self) -> Self {
            self.flip()
        }
        fn approximate_length(&self, tolerance: $S) -> $S {
            self.approximate_length(tolerance)
        }
        fn length_between(&self, t0: $S, t1: $S) -> $S {
            self.length_between(t0, t1)
        }
        fn for_each_length_piece(&self, tolerance: $S, callback: &mut dyn FnMut(Range<$S>, $S)) {
            self.for_each_length_piece(tolerance, &mut |range, length| callback(range, length))
        }
    };
}

#[cfg(test)]
fn check_segment<S: Segment<Scalar = f64>>(segment: S) {
    let length = segment.approximate_length(1e-6);
    let (a, b) = segment.split(0.3);

    assert!((a.approximate_length(1e-6) + b.approximate_length(1e-6) - length).abs() < 1e-6);
    assert_eq!(segment.length_between(0.3, 0.3), 0.0);
    assert!((segment.flip().approximate_length(1e-6) - length).abs() < 1e-9);
    assert!((segment.split_range(0.3..1.0).from() - b.from()).length() < 1e-12);

    let mut sum = 0.0;
    let mut end = 0.0;
    segment.for_each_length_piece(1e-6, &mut |range, piece_length| {
        assert_eq!(range.start, end);
        end = range.end;
        sum += piece_length;
    });
    assert_eq!(end, 1.0);
    assert!((sum - length).abs() < 1e-9);
}

#[test]
fn segments_through_the_trait() {
    use crate::{point, CubicBezierSegment, LineSegment};

    check_segment(LineSegment {
        from: point(1.0, 2.0),
        to: point(7.0, -3.0),
    });
    check_segment(CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 30.0),
        ctrl2: point(40.0, -20.0),
        to: point(50.0, 10.0),
    });
}
