//! Placements of an element along a curve.
//!
//! ## Example
//!
//! ```
//! use garland_algorithms::path::builder::CurveBuilder;
//! use garland_algorithms::math::point;
//! use garland_algorithms::pattern::placements;
//! use garland_algorithms::sampler::SamplingConfig;
//!
//! let mut builder = CurveBuilder::new();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(0.0, 20.0));
//! builder.end(false);
//! let curves = builder.build().unwrap();
//!
//! let config = SamplingConfig::spacing(5.0).with_angle_offset(-90.0);
//! let placements: Vec<_> = placements(&curves[0], &config).unwrap().collect();
//!
//! assert_eq!(placements.len(), 5);
//! assert_eq!(placements[4].position, point(0.0, 20.0));
//! assert!(placements[4].rotation_degrees.abs() < 1e-9);
//! ```

use crate::math::Point;
use crate::orientation;
use crate::path::Curve;
use crate::sampler::{sample, Distances, InvalidConfig, SamplingConfig};

/// Where and how to place one copy of an element.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Arc length from the start of the curve.
    pub distance: f64,
    pub position: Point,
    /// Tangent angle plus the configured offset, not wrapped.
    pub rotation_degrees: f64,
}

/// Computes the placements along a curve lazily, in order.
pub fn placements<'l>(
    curve: &'l Curve,
    config: &SamplingConfig,
) -> Result<Placements<'l>, InvalidConfig> {
    let distances = sample(curve, config)?;

    Ok(Placements {
        curve,
        distances,
        angle_offset_degrees: config.angle_offset_degrees,
    })
}

/// Iterator over the placements of an element along a curve.
///
/// See [`placements`].
#[derive(Clone, Debug)]
pub struct Placements<'l> {
    curve: &'l Curve,
    distances: Distances,
    angle_offset_degrees: f64,
}

impl<'l> Placements<'l> {
    /// Computes the placement at an arbitrary distance along the curve.
    pub fn placement_at(&self, distance: f64) -> Placement {
        Placement {
            distance,
            position: self.curve.position_at(distance),
            rotation_degrees: orientation::resolve(
                self.curve,
                distance,
                self.angle_offset_degrees,
            ),
        }
    }
}

impl<'l> Iterator for Placements<'l> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        let distance = self.distances.next()?;
        Some(self.placement_at(distance))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.distances.size_hint()
    }
}

impl<'l> ExactSizeIterator for Placements<'l> {}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::builder::CurveBuilder;

#[cfg(test)]
fn square(side: f64) -> Curve {
    let mut builder = CurveBuilder::new();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(side, 0.0));
    builder.line_to(point(side, side));
    builder.line_to(point(0.0, side));
    builder.close();

    builder.build().unwrap().remove(0)
}

#[cfg(test)]
fn assert_close(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

#[test]
fn walk_square() {
    let curve = square(10.0);
    let result: Vec<Placement> = placements(&curve, &SamplingConfig::spacing(5.0))
        .unwrap()
        .collect();

    assert_eq!(result.len(), 9);
    assert_eq!(result[0].position, point(0.0, 0.0));
    assert_eq!(result[8].position, point(0.0, 0.0));

    assert_close(result[1].position, point(5.0, 0.0));
    assert!((result[1].rotation_degrees - 0.0).abs() < 1e-9);

    assert_close(result[3].position, point(10.0, 5.0));
    assert!((result[3].rotation_degrees - 90.0).abs() < 1e-9);

    assert_close(result[5].position, point(5.0, 10.0));
    assert!((result[5].rotation_degrees - 180.0).abs() < 1e-9);

    assert_close(result[7].position, point(0.0, 5.0));
    assert!((result[7].rotation_degrees + 90.0).abs() < 1e-9);

    for (i, placement) in result.iter().enumerate() {
        assert_eq!(placement.distance, i as f64 * 5.0);
    }
}

#[test]
fn angle_offset() {
    let curve = square(10.0);
    let config = SamplingConfig::spacing(5.0).with_angle_offset(15.0);
    let result: Vec<Placement> = placements(&curve, &config).unwrap().collect();

    assert!((result[1].rotation_degrees - 15.0).abs() < 1e-9);
    assert!((result[3].rotation_degrees - 105.0).abs() < 1e-9);
}

#[test]
fn evenly_spaced_along_cubic() {
    let mut builder = CurveBuilder::new();
    builder.begin(point(0.0, 0.0));
    builder.cubic_bezier_to(point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0));
    builder.end(false);
    let curves = builder.build().unwrap();
    let curve = &curves[0];

    let config = SamplingConfig::spacing(1.0);
    let result: Vec<Placement> = placements(curve, &config).unwrap().collect();
    assert_eq!(result.len(), curve.length().floor() as usize + 1);

    // Chords of one unit of arc length on a gentle curve are slightly shorter.
    for pair in result.windows(2) {
        let chord = (pair[1].position - pair[0].position).length();
        assert!(chord <= 1.0 + 1e-6, "chord {}", chord);
        assert!(chord > 0.99, "chord {}", chord);
    }
}

#[test]
fn invalid_config() {
    let curve = square(10.0);
    let config = SamplingConfig::spacing(0.0);

    assert!(placements(&curve, &config).is_err());
}

#[test]
fn exact_size() {
    let curve = square(10.0);
    let mut iter = placements(&curve, &SamplingConfig::spacing(3.0)).unwrap();

    assert_eq!(iter.len(), 14);
    iter.next();
    assert_eq!(iter.len(), 13);
}
