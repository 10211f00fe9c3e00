//! Rotation of the elements placed along a curve.

use crate::path::{Curve, Tangent};

/// Rotation in degrees of an element placed at `distance` along the curve.
///
/// This is the angle of the tangent relative to the x axis (`atan2(y, x)`) plus the
/// offset. Where the tangent is undefined the base angle is zero, so the offset
/// alone is returned. The result is not wrapped to any range.
pub fn resolve(curve: &Curve, distance: f64, angle_offset_degrees: f64) -> f64 {
    tangent_degrees(curve.tangent_at(distance)) + angle_offset_degrees
}

/// Angle of a tangent in degrees, or zero if it is undefined.
#[inline]
pub fn tangent_degrees(tangent: Tangent) -> f64 {
    match tangent.angle() {
        Some(angle) => angle.to_degrees(),
        None => 0.0,
    }
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::CurveSegment;

#[cfg(test)]
fn assert_degrees(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn axis_aligned_lines() {
    let right = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(10.0, 0.0))]).unwrap();
    let up = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(0.0, 10.0))]).unwrap();
    let left = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(-10.0, 0.0))]).unwrap();
    let down = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(0.0, -10.0))]).unwrap();

    assert_degrees(resolve(&right, 5.0, 0.0), 0.0);
    assert_degrees(resolve(&up, 5.0, 0.0), 90.0);
    assert_degrees(resolve(&left, 5.0, 0.0), 180.0);
    assert_degrees(resolve(&down, 5.0, 0.0), -90.0);
}

#[test]
fn offset_is_added_without_wrapping() {
    let up = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(0.0, 10.0))]).unwrap();

    assert_degrees(resolve(&up, 0.0, 45.0), 135.0);
    assert_degrees(resolve(&up, 10.0, 300.0), 390.0);
    assert_degrees(resolve(&up, 3.0, -720.0), -630.0);
}

#[test]
fn diagonal() {
    let curve = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(3.0, 3.0))]).unwrap();
    assert_degrees(resolve(&curve, 1.0, 0.0), 45.0);
}

#[test]
fn degenerate_tangent_uses_offset() {
    let dot = Curve::new(vec![CurveSegment::line(point(2.0, 2.0), point(2.0, 2.0))]).unwrap();

    assert_degrees(resolve(&dot, 0.0, 0.0), 0.0);
    assert_degrees(resolve(&dot, 0.0, 30.0), 30.0);

    assert_eq!(tangent_degrees(Tangent::Undefined), 0.0);
}

#[test]
fn cubic_tangent() {
    // Starts heading up, ends heading down.
    let arch = Curve::new(vec![CurveSegment::cubic(
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(10.0, 10.0),
        point(10.0, 0.0),
    )])
    .unwrap();

    assert_degrees(resolve(&arch, 0.0, 0.0), 90.0);
    assert_degrees(resolve(&arch, arch.length(), 0.0), -90.0);
    assert!(resolve(&arch, arch.length() / 2.0, 0.0).abs() < 1e-6);
}
