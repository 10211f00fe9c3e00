use crate::geom::{CubicBezierSegment, LineSegment, Segment, DEFAULT_LENGTH_TOLERANCE};
use crate::math::{Point, Vector};
use crate::measure::{ArcLengthTable, Tangent};

use std::cell::OnceCell;
use std::ops::Range;

use thiserror::Error;

/// Maximum distance between the end of a segment and the start of the next one,
/// relative to the magnitude of the coordinates (and absolute below 1.0).
pub const CONTIGUITY_TOLERANCE: f64 = 1e-6;

/// Errors returned when a curve is built from malformed geometry.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum InvalidCurve {
    #[error("A curve needs at least one segment.")]
    Empty,
    #[error("Segment {index} starts {gap} units away from the end of the previous segment.")]
    Discontinuous { index: usize, gap: f64 },
    #[error("Segment {index} has a coordinate that is not a finite number.")]
    NonFinite { index: usize },
}

/// A piece of a curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CurveSegment {
    Line(LineSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
}

macro_rules! dispatch {
    ($segment:expr, $s:ident => $code:expr) => {
        match $segment {
            CurveSegment::Line($s) => $code,
            CurveSegment::Cubic($s) => $code,
        }
    };
}

impl CurveSegment {
    #[inline]
    pub fn line(from: Point, to: Point) -> Self {
        CurveSegment::Line(LineSegment { from, to })
    }

    #[inline]
    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        CurveSegment::Cubic(CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        })
    }

    #[inline]
    pub fn from(&self) -> Point {
        dispatch!(self, s => s.from)
    }

    #[inline]
    pub fn to(&self) -> Point {
        dispatch!(self, s => s.to)
    }

    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        dispatch!(self, s => s.sample(t))
    }

    /// Sample the derivative at t (expecting t between 0 and 1).
    #[inline]
    pub fn derivative(&self, t: f64) -> Vector {
        dispatch!(self, s => s.derivative(t))
    }

    /// Arc length of the segment.
    pub fn length(&self, tolerance: f64) -> f64 {
        dispatch!(self, s => Segment::approximate_length(s, tolerance))
    }

    /// Arc length of the part of the segment between two parameter values.
    pub fn length_between(&self, t0: f64, t1: f64) -> f64 {
        dispatch!(self, s => Segment::length_between(s, t0, t1))
    }

    /// See `CubicBezierSegment::for_each_length_piece`.
    pub fn for_each_length_piece(&self, tolerance: f64, callback: &mut dyn FnMut(Range<f64>, f64)) {
        dispatch!(self, s => Segment::for_each_length_piece(s, tolerance, callback))
    }

    fn is_finite(&self) -> bool {
        let finite = |p: Point| p.x.is_finite() && p.y.is_finite();
        match self {
            CurveSegment::Line(s) => finite(s.from) && finite(s.to),
            CurveSegment::Cubic(s) => {
                finite(s.from) && finite(s.ctrl1) && finite(s.ctrl2) && finite(s.to)
            }
        }
    }
}

/// An immutable sequence of contiguous segments.
///
/// Measurements are computed lazily and cached: the first call to `length`,
/// `position_at`, `tangent_at` or `arc_length_table` builds the arc length table,
/// subsequent calls reuse it.
#[derive(Clone, Debug)]
pub struct Curve {
    segments: Vec<CurveSegment>,
    tolerance: f64,
    table: OnceCell<ArcLengthTable>,
}

impl Curve {
    /// Creates a curve measured with `DEFAULT_LENGTH_TOLERANCE`.
    pub fn new(segments: Vec<CurveSegment>) -> Result<Self, InvalidCurve> {
        Self::with_tolerance(segments, DEFAULT_LENGTH_TOLERANCE)
    }

    /// Creates a curve measured with a specific relative tolerance.
    ///
    /// Tolerances below `1e-9` are clamped.
    pub fn with_tolerance(segments: Vec<CurveSegment>, tolerance: f64) -> Result<Self, InvalidCurve> {
        if segments.is_empty() {
            return Err(InvalidCurve::Empty);
        }

        for (index, segment) in segments.iter().enumerate() {
            if !segment.is_finite() {
                return Err(InvalidCurve::NonFinite { index });
            }
        }

        for (index, pair) in segments.windows(2).enumerate() {
            let end = pair[0].to();
            let start = pair[1].from();
            let magnitude = end.x.abs().max(end.y.abs()).max(1.0);
            let gap = (start - end).length();
            if gap > CONTIGUITY_TOLERANCE * magnitude {
                return Err(InvalidCurve::Discontinuous {
                    index: index + 1,
                    gap,
                });
            }
        }

        Ok(Curve {
            segments,
            tolerance: tolerance.max(1e-9),
            table: OnceCell::new(),
        })
    }

    #[inline]
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// The relative tolerance used to measure the curved segments.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Start of the first segment.
    #[inline]
    pub fn first_point(&self) -> Point {
        self.segments[0].from()
    }

    /// End of the last segment.
    #[inline]
    pub fn last_point(&self) -> Point {
        self.segments[self.segments.len() - 1].to()
    }

    /// Returns the arc length table, building it if needed.
    pub fn arc_length_table(&self) -> &ArcLengthTable {
        self.table
            .get_or_init(|| ArcLengthTable::new(&self.segments, self.tolerance))
    }

    /// Total arc length of the curve.
    pub fn length(&self) -> f64 {
        self.arc_length_table().length()
    }

    /// Position at a given arc length distance from the start of the curve.
    ///
    /// The distance is clamped to `[0, length]`.
    pub fn position_at(&self, distance: f64) -> Point {
        let table = self.arc_length_table();
        if !(distance > 0.0) {
            return self.first_point();
        }
        if distance >= table.length() {
            return self.last_point();
        }

        let (index, t) = table.locate(&self.segments, distance);
        self.segments[index].sample(t)
    }

    /// Unit tangent at a given arc length distance from the start of the curve.
    ///
    /// The distance is clamped to `[0, length]`. Returns `Tangent::Undefined` where the
    /// derivative vanishes (cusps, zero-length segments, coincident control points).
    pub fn tangent_at(&self, distance: f64) -> Tangent {
        let table = self.arc_length_table();
        let distance = if distance > 0.0 { distance.min(table.length()) } else { 0.0 };
        let (index, t) = table.locate(&self.segments, distance);

        Tangent::from_derivative(self.segments[index].derivative(t))
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments && self.tolerance == other.tolerance
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn empty_curve() {
    assert_eq!(Curve::new(Vec::new()), Err(InvalidCurve::Empty));
}

#[test]
fn discontinuous_curve() {
    let result = Curve::new(vec![
        CurveSegment::line(point(0.0, 0.0), point(10.0, 0.0)),
        CurveSegment::line(point(10.0, 0.0), point(10.0, 10.0)),
        CurveSegment::line(point(10.0, 11.0), point(0.0, 0.0)),
    ]);

    match result {
        Err(InvalidCurve::Discontinuous { index, gap }) => {
            assert_eq!(index, 2);
            assert!((gap - 1.0).abs() < 1e-12);
        }
        other => panic!("Expected a discontinuity, got {:?}", other),
    }
}

#[test]
fn contiguity_within_tolerance() {
    let curve = Curve::new(vec![
        CurveSegment::line(point(0.0, 0.0), point(1000.0, 0.0)),
        CurveSegment::line(point(1000.0 + 1e-5, 0.0), point(1000.0, 10.0)),
    ]);

    assert!(curve.is_ok());
}

#[test]
fn non_finite_curve() {
    let result = Curve::new(vec![
        CurveSegment::line(point(0.0, 0.0), point(10.0, 0.0)),
        CurveSegment::cubic(point(10.0, 0.0), point(f64::NAN, 0.0), point(20.0, 5.0), point(30.0, 0.0)),
    ]);

    assert_eq!(result, Err(InvalidCurve::NonFinite { index: 1 }));
}

#[test]
fn length_is_sum_of_segment_lengths() {
    let segments = vec![
        CurveSegment::line(point(0.0, 0.0), point(30.0, 40.0)),
        CurveSegment::cubic(point(30.0, 40.0), point(60.0, 80.0), point(90.0, 0.0), point(120.0, 40.0)),
        CurveSegment::line(point(120.0, 40.0), point(120.0, 40.0)),
        CurveSegment::cubic(point(120.0, 40.0), point(120.0, 90.0), point(0.0, 90.0), point(0.0, 40.0)),
    ];

    let curve = Curve::new(segments.clone()).unwrap();
    let expected: f64 = segments.iter().map(|s| s.length(curve.tolerance())).sum();

    assert!(curve.length() >= 0.0);
    assert!((curve.length() - expected).abs() < 1e-9 * expected);
}

#[test]
fn endpoints() {
    let curve = Curve::new(vec![
        CurveSegment::cubic(point(5.0, 5.0), point(20.0, 40.0), point(60.0, -30.0), point(80.0, 10.0)),
        CurveSegment::line(point(80.0, 10.0), point(80.0, 70.0)),
        CurveSegment::cubic(point(80.0, 70.0), point(60.0, 90.0), point(20.0, 90.0), point(-3.0, 71.0)),
    ])
    .unwrap();

    assert_eq!(curve.position_at(0.0), point(5.0, 5.0));
    assert_eq!(curve.position_at(curve.length()), point(-3.0, 71.0));
    assert_eq!(curve.position_at(-10.0), point(5.0, 5.0));
    assert_eq!(curve.position_at(curve.length() + 10.0), point(-3.0, 71.0));
}

#[test]
fn positions_on_polyline() {
    let curve = Curve::new(vec![
        CurveSegment::line(point(0.0, 0.0), point(10.0, 0.0)),
        CurveSegment::line(point(10.0, 0.0), point(10.0, 10.0)),
        CurveSegment::line(point(10.0, 10.0), point(0.0, 10.0)),
    ])
    .unwrap();

    assert_eq!(curve.length(), 30.0);
    for (distance, expected, tangent) in [
        (5.0, point(5.0, 0.0), Vector::new(1.0, 0.0)),
        (15.0, point(10.0, 5.0), Vector::new(0.0, 1.0)),
        (25.0, point(5.0, 10.0), Vector::new(-1.0, 0.0)),
    ] {
        assert!((curve.position_at(distance) - expected).length() < 1e-12);
        assert_eq!(curve.tangent_at(distance), Tangent::Defined(tangent));
    }
}

#[test]
fn positions_on_cubic_are_evenly_spaced() {
    // Control points bunched towards the start: parameter space is very uneven.
    let curve = Curve::new(vec![CurveSegment::cubic(
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
        point(100.0, 0.0),
    )])
    .unwrap();

    assert!((curve.length() - 100.0).abs() < 1e-6);
    for i in 0..=20 {
        let distance = i as f64 * 5.0;
        let p = curve.position_at(distance);
        assert!((p.x - distance).abs() < 1e-6, "{} -> {:?}", distance, p);
        assert!(p.y.abs() < 1e-12);
    }
}

#[test]
fn degenerate_tangents() {
    let curve = Curve::new(vec![
        CurveSegment::cubic(point(0.0, 0.0), point(0.0, 0.0), point(0.0, 10.0), point(0.0, 10.0)),
    ])
    .unwrap();

    assert_eq!(curve.tangent_at(0.0), Tangent::Undefined);
    assert_eq!(curve.tangent_at(curve.length()), Tangent::Undefined);
    match curve.tangent_at(curve.length() / 2.0) {
        Tangent::Defined(v) => assert!((v - Vector::new(0.0, 1.0)).length() < 1e-9),
        Tangent::Undefined => panic!("Expected a tangent in the middle of the curve"),
    }

    let point_curve = Curve::new(vec![CurveSegment::line(point(3.0, 3.0), point(3.0, 3.0))]).unwrap();
    assert_eq!(point_curve.length(), 0.0);
    assert_eq!(point_curve.position_at(0.0), point(3.0, 3.0));
    assert_eq!(point_curve.tangent_at(0.0), Tangent::Undefined);
}

#[test]
fn table_is_cached() {
    let curve = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(3.0, 4.0))]).unwrap();
    let a: *const ArcLengthTable = curve.arc_length_table();
    let b: *const ArcLengthTable = curve.arc_length_table();
    assert_eq!(a, b);
    assert_eq!(curve.length(), 5.0);
}
