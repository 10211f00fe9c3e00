//! Build curves from a sequence of drawing commands.
//!
//! ```
//! use garland_path::builder::CurveBuilder;
//! use garland_path::math::point;
//!
//! let mut builder = CurveBuilder::new();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(1.0, 2.0));
//! builder.quadratic_bezier_to(point(2.0, 3.0), point(3.0, 2.0));
//! builder.close();
//!
//! builder.begin(point(10.0, 10.0));
//! builder.line_to(point(20.0, 10.0));
//! builder.end(false);
//!
//! // One curve per sub-path.
//! let curves = builder.build().unwrap();
//! assert_eq!(curves.len(), 2);
//! ```

use crate::curve::{Curve, CurveSegment, InvalidCurve};
use crate::geom::DEFAULT_LENGTH_TOLERANCE;
use crate::math::{point, Point};

/// Accumulates segments into one curve per sub-path.
///
/// Sub-paths that contain no segment (a lone `begin`) are dropped.
#[derive(Clone, Debug)]
pub struct CurveBuilder {
    curves: Vec<Vec<CurveSegment>>,
    current: Vec<CurveSegment>,
    first: Point,
    position: Point,
    in_subpath: bool,
    tolerance: f64,
}

impl CurveBuilder {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_LENGTH_TOLERANCE)
    }

    /// The built curves will be measured with this relative tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        CurveBuilder {
            curves: Vec::new(),
            current: Vec::new(),
            first: point(0.0, 0.0),
            position: point(0.0, 0.0),
            in_subpath: false,
            tolerance,
        }
    }

    /// Starts a new sub-path, ending the current one if needed.
    pub fn begin(&mut self, at: Point) {
        if self.in_subpath {
            self.end(false);
        }

        self.first = at;
        self.position = at;
        self.in_subpath = true;
    }

    /// Ends the current sub-path, optionally with a line back to its first point.
    pub fn end(&mut self, close: bool) {
        if !self.in_subpath {
            return;
        }

        if close && self.position != self.first {
            let first = self.first;
            self.line_to(first);
        }

        if !self.current.is_empty() {
            self.curves.push(std::mem::take(&mut self.current));
        }
        self.in_subpath = false;
    }

    #[inline]
    pub fn close(&mut self) {
        self.end(true)
    }

    pub fn line_to(&mut self, to: Point) {
        self.begin_if_needed();
        self.current.push(CurveSegment::line(self.position, to));
        self.position = to;
    }

    /// Adds a quadratic bézier segment, stored as the equivalent cubic.
    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        let from = self.position;
        let ctrl1 = from + (ctrl - from) * (2.0 / 3.0);
        let ctrl2 = to + (ctrl - to) * (2.0 / 3.0);
        self.cubic_bezier_to(ctrl1, ctrl2, to);
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.begin_if_needed();
        self.current
            .push(CurveSegment::cubic(self.position, ctrl1, ctrl2, to));
        self.position = to;
    }

    /// The end of the last added segment, or the start of the current sub-path.
    #[inline]
    pub fn current_position(&self) -> Point {
        self.position
    }

    /// Builds one curve per non-empty sub-path.
    ///
    /// Fails with `InvalidCurve::Empty` if no segment was added at all.
    pub fn build(mut self) -> Result<Vec<Curve>, InvalidCurve> {
        self.end(false);
        if self.curves.is_empty() {
            return Err(InvalidCurve::Empty);
        }

        let tolerance = self.tolerance;
        self.curves
            .into_iter()
            .map(|segments| Curve::with_tolerance(segments, tolerance))
            .collect()
    }

    fn begin_if_needed(&mut self) {
        if !self.in_subpath {
            let at = self.position;
            self.begin(at);
        }
    }
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn close_adds_a_line() {
    let mut builder = CurveBuilder::new();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.close();

    let curves = builder.build().unwrap();
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].segments().len(), 3);
    assert_eq!(curves[0].last_point(), point(0.0, 0.0));
    assert!((curves[0].length() - (20.0 + 200f64.sqrt())).abs() < 1e-9);
}

#[test]
fn empty_sub_paths_are_dropped() {
    let mut builder = CurveBuilder::new();
    builder.begin(point(0.0, 0.0));
    builder.begin(point(5.0, 5.0));
    builder.line_to(point(6.0, 5.0));
    builder.begin(point(7.0, 7.0));
    builder.end(true);

    let curves = builder.build().unwrap();
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].first_point(), point(5.0, 5.0));

    assert_eq!(CurveBuilder::new().build(), Err(InvalidCurve::Empty));
}

#[test]
fn quadratic_elevation() {
    let mut builder = CurveBuilder::new();
    builder.begin(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(3.0, 3.0), point(6.0, 0.0));
    let curves = builder.build().unwrap();

    match curves[0].segments()[0] {
        CurveSegment::Cubic(cubic) => {
            assert!((cubic.ctrl1 - point(2.0, 2.0)).length() < 1e-12);
            assert!((cubic.ctrl2 - point(4.0, 2.0)).length() < 1e-12);
            // Apex of the quadratic curve.
            assert!((cubic.sample(0.5) - point(3.0, 1.5)).length() < 1e-12);
        }
        other => panic!("Expected a cubic segment, got {:?}", other),
    }
}
