use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::{Point, Vector};

use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// The derivative of a line segment is constant.
    #[inline]
    pub fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        LineSegment {
            from: self.from.lerp(self.to, t_range.start),
            to: self.from.lerp(self.to, t_range.end),
        }
    }

    /// Split this curve into two sub-segments.
    #[inline]
    pub fn split(&self, t: S) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Same as `length`, the tolerance is only there to match the other segment types.
    #[inline]
    pub fn approximate_length(&self, _tolerance: S) -> S {
        self.length()
    }

    /// Length of the part of the segment between two parameter values.
    #[inline]
    pub fn length_between(&self, t0: S, t1: S) -> S {
        self.length() * (t1 - t0).abs()
    }

    /// A line segment is always a single piece.
    pub fn for_each_length_piece<F>(&self, _tolerance: S, callback: &mut F)
    where
        F: FnMut(Range<S>, S),
    {
        callback(S::ZERO..S::ONE, self.length());
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    impl_segment!(S);
}

#[test]
fn split_line_segment() {
    use crate::point;

    let l = LineSegment {
        from: point(0.0, 0.0),
        to: point(4.0, 2.0),
    };

    let (a, b) = l.split(0.25);
    assert_eq!(a.to, point(1.0, 0.5));
    assert_eq!(b.from, point(1.0, 0.5));
    assert_eq!(l.split_range(0.25..0.75), LineSegment { from: point(1.0, 0.5), to: point(3.0, 1.5) });
    assert_eq!(l.flip().flip(), l);
}

#[test]
fn line_segment_length() {
    use crate::point;

    let l = LineSegment {
        from: point(1.0f64, 1.0),
        to: point(4.0, 5.0),
    };

    assert_eq!(l.length(), 5.0);
    assert!((l.length_between(0.2, 0.6) - 2.0).abs() < 1e-12);

    let mut pieces = 0;
    l.for_each_length_piece(1e-4, &mut |range, length| {
        assert_eq!(range, 0.0..1.0);
        assert_eq!(length, 5.0);
        pieces += 1;
    });
    assert_eq!(pieces, 1);
}
