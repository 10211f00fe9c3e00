//! Read curves from SVG path data.
//!
//! Path data is tokenized by `svgtypes`, which resolves relative, shorthand and
//! smooth commands into absolute ones. Elliptic arcs (`A`) arrive as cubic bézier
//! approximations, so every SVG path command is accepted.
//!
//! ```
//! use garland_path::parser::parse_curves;
//!
//! let curves = parse_curves("M 0 0 L 100 0 C 150 0 150 50 100 50").unwrap();
//! assert_eq!(curves[0].segments().len(), 2);
//! ```

use crate::builder::CurveBuilder;
use crate::curve::{Curve, InvalidCurve};
use crate::math::point;

use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    /// The path data is malformed. Holds the tokenizer's message, which names the
    /// offending position.
    #[error("{0}")]
    Syntax(String),
    #[error(transparent)]
    Curve(#[from] InvalidCurve),
}

impl From<svgtypes::Error> for ParseError {
    fn from(error: svgtypes::Error) -> Self {
        ParseError::Syntax(error.to_string())
    }
}

/// Feeds every segment of the path data to a builder.
///
/// Segments read before a syntax error stay in the builder.
pub fn parse_into(src: &str, builder: &mut CurveBuilder) -> Result<(), ParseError> {
    for segment in SimplifyingPathParser::from(src) {
        match segment? {
            SimplePathSegment::MoveTo { x, y } => builder.begin(point(x, y)),
            SimplePathSegment::LineTo { x, y } => builder.line_to(point(x, y)),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quadratic_bezier_to(point(x1, y1), point(x, y))
            }
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => builder.cubic_bezier_to(point(x1, y1), point(x2, y2), point(x, y)),
            SimplePathSegment::ClosePath => builder.close(),
        }
    }

    Ok(())
}

/// Parses path data into one curve per sub-path, measured with the default tolerance.
pub fn parse_curves(src: &str) -> Result<Vec<Curve>, ParseError> {
    parse_curves_with_tolerance(src, crate::geom::DEFAULT_LENGTH_TOLERANCE)
}

/// Parses path data into one curve per sub-path.
pub fn parse_curves_with_tolerance(src: &str, tolerance: f64) -> Result<Vec<Curve>, ParseError> {
    let mut builder = CurveBuilder::with_tolerance(tolerance);
    parse_into(src, &mut builder)?;

    Ok(builder.build()?)
}

#[cfg(test)]
use crate::curve::CurveSegment;

#[test]
fn empty() {
    assert_eq!(parse_curves(""), Err(ParseError::Curve(InvalidCurve::Empty)));
    assert_eq!(parse_curves(" "), Err(ParseError::Curve(InvalidCurve::Empty)));
    assert_eq!(parse_curves("M 5 5"), Err(ParseError::Curve(InvalidCurve::Empty)));
}

#[test]
fn simple_square() {
    let curves = parse_curves("M 0 0 L 1 0 L 1 1 L 0 1 Z").unwrap();
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].segments().len(), 4);
    assert_eq!(curves[0].length(), 4.0);
}

#[test]
fn relative_and_shorthand_commands() {
    let curves = parse_curves("m 10 10 h 5 v 5 l -5 0 z").unwrap();
    let segments = curves[0].segments();
    assert_eq!(segments[0], CurveSegment::line(point(10.0, 10.0), point(15.0, 10.0)));
    assert_eq!(segments[1], CurveSegment::line(point(15.0, 10.0), point(15.0, 15.0)));
    assert_eq!(segments[2], CurveSegment::line(point(15.0, 15.0), point(10.0, 15.0)));
    assert_eq!(segments[3], CurveSegment::line(point(10.0, 15.0), point(10.0, 10.0)));
}

#[test]
fn smooth_cubic() {
    let curves = parse_curves("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0").unwrap();
    assert_eq!(
        curves[0].segments()[1],
        CurveSegment::cubic(point(10.0, 0.0), point(10.0, -10.0), point(20.0, -10.0), point(20.0, 0.0))
    );
}

#[test]
fn quadratic_is_elevated() {
    let curves = parse_curves("M 0 0 Q 3 3 6 0").unwrap();
    assert_eq!(
        curves[0].segments()[0],
        CurveSegment::cubic(point(0.0, 0.0), point(2.0, 2.0), point(4.0, 2.0), point(6.0, 0.0))
    );
}

#[test]
fn multiple_sub_paths() {
    let curves = parse_curves("M 0 0 L 10 0 M 0 10 L 10 10 Z").unwrap();
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].length(), 10.0);
    assert_eq!(curves[1].length(), 20.0);
}

#[test]
fn arcs_become_cubics() {
    // Half of a circle of radius 10.
    let curves = parse_curves("M 0 0 A 10 10 0 0 1 20 0").unwrap();
    let curve = &curves[0];

    assert!(curve
        .segments()
        .iter()
        .all(|segment| matches!(segment, CurveSegment::Cubic(..))));
    assert!((curve.length() - 10.0 * std::f64::consts::PI).abs() < 0.1);
    assert!((curve.position_at(curve.length()) - point(20.0, 0.0)).length() < 1e-6);
}

#[test]
fn syntax_errors() {
    let syntax_error = |src: &str| matches!(parse_curves(src), Err(ParseError::Syntax(..)));

    assert!(syntax_error("M 0 --1"));
    assert!(syntax_error("x 0 0"));
    assert!(syntax_error("M 0 0 L 1 1 x 2 2"));
    assert!(syntax_error("L 1 1"));
}

#[test]
fn numbers() {
    let curves = parse_curves("M 1e-2 -1E1 L +3 .5").unwrap();
    assert_eq!(
        curves[0].segments()[0],
        CurveSegment::line(point(0.01, -10.0), point(3.0, 0.5))
    );
}

#[test]
fn parse_into_an_existing_builder() {
    let mut builder = CurveBuilder::new();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(0.0, 5.0));

    parse_into("M 10 0 L 20 0", &mut builder).unwrap();

    let curves = builder.build().unwrap();
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[1].length(), 10.0);
}
