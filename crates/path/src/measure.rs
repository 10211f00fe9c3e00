//! Cached arc length measurements of a curve.
//!
//! The [`ArcLengthTable`] maps cumulative arc length to a segment index and a local
//! parameter. Each curved segment is split into pieces that are flat enough for the
//! curve's tolerance (see `CubicBezierSegment::for_each_length_piece`), and the table
//! stores the distance from the start of the curve at the end of every piece.
//!
//! A distance query binary searches the table for the enclosing piece, then solves for
//! the parameter whose local arc length equals the residual distance, using a few
//! Newton steps on the piece's Gauss-Legendre length, guarded by bisection.

use crate::curve::CurveSegment;
use crate::math::Vector;
use crate::geom::Angle;

/// Derivative magnitude below which the tangent is considered undefined.
pub const DEGENERATE_TANGENT_EPSILON: f64 = 1e-9;

const MAX_SOLVER_ITERATIONS: u32 = 24;

/// The direction of a curve at a given distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tangent {
    /// A unit vector.
    Defined(Vector),
    /// The derivative vanishes at this point (cusp, zero-length segment or
    /// coincident control points).
    Undefined,
}

impl Tangent {
    /// Normalizes a derivative, or returns `Undefined` if it is too small.
    pub fn from_derivative(derivative: Vector) -> Self {
        let length = derivative.length();
        if !(length >= DEGENERATE_TANGENT_EPSILON) {
            return Tangent::Undefined;
        }

        Tangent::Defined(derivative / length)
    }

    /// Angle between the x axis and the tangent, if any.
    pub fn angle(&self) -> Option<Angle<f64>> {
        match self {
            Tangent::Defined(v) => Some(v.angle_from_x_axis()),
            Tangent::Undefined => None,
        }
    }

    #[inline]
    pub fn is_defined(&self) -> bool {
        matches!(self, Tangent::Defined(..))
    }
}

/// One entry of the table: the end of a measured piece.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcLengthEntry {
    /// Distance from the beginning of the curve.
    pub distance: f64,
    /// Which segment this entry is on.
    pub segment: usize,
    /// Parameter of the end of the piece on its segment.
    pub t: f64,
}

/// A monotonically non-decreasing mapping from arc length to (segment, t).
///
/// The first entry is always `{ distance: 0, segment: 0, t: 0 }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLengthTable {
    entries: Vec<ArcLengthEntry>,
}

impl ArcLengthTable {
    /// Measures a sequence of segments.
    pub fn new(segments: &[CurveSegment], tolerance: f64) -> Self {
        let mut entries = Vec::with_capacity(segments.len() + 1);
        entries.push(ArcLengthEntry {
            distance: 0.0,
            segment: 0,
            t: 0.0,
        });

        let mut distance = 0.0;
        for (index, segment) in segments.iter().enumerate() {
            segment.for_each_length_piece(tolerance, &mut |range, length| {
                distance += length;
                entries.push(ArcLengthEntry {
                    distance,
                    segment: index,
                    t: range.end,
                });
            });
        }

        ArcLengthTable { entries }
    }

    /// Total length of the measured curve.
    #[inline]
    pub fn length(&self) -> f64 {
        self.entries.last().map_or(0.0, |e| e.distance)
    }

    #[inline]
    pub fn entries(&self) -> &[ArcLengthEntry] {
        &self.entries
    }

    /// Finds the segment index and parameter at a given distance.
    ///
    /// `segments` must be the ones the table was built from. The distance is
    /// expected to be in `[0, length]`.
    pub fn locate(&self, segments: &[CurveSegment], distance: f64) -> (usize, f64) {
        if self.entries.len() < 2 {
            return (0, 0.0);
        }

        let idx = self
            .entries
            .partition_point(|e| e.distance < distance)
            .clamp(1, self.entries.len() - 1);

        let prev = &self.entries[idx - 1];
        let cur = &self.entries[idx];
        let t_begin = if prev.segment == cur.segment { prev.t } else { 0.0 };

        let t = solve_t(
            &segments[cur.segment],
            t_begin..cur.t,
            distance - prev.distance,
            cur.distance - prev.distance,
        );

        (cur.segment, t)
    }
}

/// Finds t in `t_range` such that the arc length between `t_range.start` and t is
/// `residual`.
fn solve_t(
    segment: &CurveSegment,
    t_range: std::ops::Range<f64>,
    residual: f64,
    piece_length: f64,
) -> f64 {
    let (t0, t1) = (t_range.start, t_range.end);
    if !(residual > 0.0) || !(piece_length > 0.0) {
        return t0;
    }
    if residual >= piece_length {
        return t1;
    }

    let ratio = residual / piece_length;
    if let CurveSegment::Line(_) = segment {
        return t0 + (t1 - t0) * ratio;
    }

    let tolerance = 1e-10 * piece_length.max(1.0);
    let (mut lo, mut hi) = (t0, t1);
    let mut t = t0 + (t1 - t0) * ratio;
    for _ in 0..MAX_SOLVER_ITERATIONS {
        let error = segment.length_between(t0, t) - residual;
        if error.abs() <= tolerance {
            break;
        }

        if error > 0.0 {
            hi = t;
        } else {
            lo = t;
        }

        let speed = segment.derivative(t).length();
        let newton = t - error / speed;
        t = if speed > DEGENERATE_TANGENT_EPSILON && newton > lo && newton < hi {
            newton
        } else {
            (lo + hi) * 0.5
        };
    }

    t
}

#[cfg(test)]
use crate::math::point;

#[test]
fn entries_are_monotonic() {
    let segments = [
        CurveSegment::cubic(point(0.0, 0.0), point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0)),
        CurveSegment::line(point(100.0, 0.0), point(100.0, 0.0)),
        CurveSegment::line(point(100.0, 0.0), point(200.0, 0.0)),
        CurveSegment::cubic(point(200.0, 0.0), point(150.0, -80.0), point(300.0, 40.0), point(250.0, -10.0)),
    ];

    let table = ArcLengthTable::new(&segments, 1e-4);
    let entries = table.entries();
    assert_eq!(entries[0], ArcLengthEntry { distance: 0.0, segment: 0, t: 0.0 });
    for pair in entries.windows(2) {
        assert!(pair[1].distance >= pair[0].distance);
        assert!(pair[1].segment >= pair[0].segment);
    }
    assert_eq!(entries.last().unwrap().segment, 3);
    assert_eq!(entries.last().unwrap().t, 1.0);
}

#[test]
fn locate_matches_local_length() {
    let segment = CurveSegment::cubic(
        point(0.0, 0.0),
        point(10.0, 60.0),
        point(90.0, -60.0),
        point(100.0, 0.0),
    );
    let segments = [segment];
    let table = ArcLengthTable::new(&segments, 1e-4);

    for i in 1..10 {
        let distance = table.length() * i as f64 / 10.0;
        let (index, t) = table.locate(&segments, distance);
        assert_eq!(index, 0);

        let steps = 20_000;
        let mut measured = 0.0;
        let mut prev = segment.sample(0.0);
        for j in 1..=steps {
            let p = segment.sample(t * j as f64 / steps as f64);
            measured += (p - prev).length();
            prev = p;
        }
        assert!((measured - distance).abs() < 1e-4, "{} vs {}", measured, distance);
    }
}

#[test]
fn tangent_angle() {
    let t = Tangent::from_derivative(Vector::new(0.0, 3.0));
    assert!((t.angle().unwrap().to_degrees() - 90.0).abs() < 1e-12);
    assert_eq!(Tangent::from_derivative(Vector::new(0.0, 0.0)), Tangent::Undefined);
    assert_eq!(Tangent::Undefined.angle(), None);
    assert!(!Tangent::Undefined.is_defined());
}
