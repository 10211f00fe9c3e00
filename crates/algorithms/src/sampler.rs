//! Evenly spaced arc length distances along a curve.
//!
//! Copies of an element are laid out every `spacing + element_width` units of arc
//! length, starting at the beginning of the curve. The end of the curve is inclusive:
//! if the last distance lands on it (within [`BOUNDARY_TOLERANCE`] relative to the
//! length of the curve) a copy is placed there too, so a curve of length `L` sampled
//! with a step `s` yields `floor(L / s) + 1` distances.
//!
//! ```
//! use garland_algorithms::path::Curve;
//! use garland_algorithms::path::CurveSegment;
//! use garland_algorithms::math::point;
//! use garland_algorithms::sampler::{sample, SamplingConfig};
//!
//! let curve = Curve::new(vec![
//!     CurveSegment::line(point(0.0, 0.0), point(100.0, 0.0)),
//! ]).unwrap();
//!
//! let distances: Vec<f64> = sample(&curve, &SamplingConfig::spacing(10.0)).unwrap().collect();
//! assert_eq!(distances.len(), 11);
//! assert_eq!(distances[10], 100.0);
//! ```

use crate::path::Curve;

use thiserror::Error;

/// Distances that overshoot the end of the curve by less than this (scaled by
/// `max(1, length)`) are emitted, clamped to the length.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Largest number of distances a curve can be sampled at.
pub const MAX_PLACEMENTS: usize = 1 << 24;

/// Errors returned for sampling parameters that can't produce a finite sequence.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum InvalidConfig {
    #[error("{field} must be a finite number, got {value}.")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}.")]
    Negative { field: &'static str, value: f64 },
    #[error("The step between placements (spacing + element width) must be positive, got {step}.")]
    NonPositiveStep { step: f64 },
    #[error(
        "A curve of length {length} sampled every {step} units needs more than {} placements.",
        MAX_PLACEMENTS
    )]
    TooManyPlacements { length: f64, step: f64 },
}

/// Parameters for laying out elements along a curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct SamplingConfig {
    /// Gap between two consecutive copies.
    ///
    /// Default value: `SamplingConfig::DEFAULT_SPACING`.
    pub spacing: f64,

    /// Width of the element along the curve, added to the spacing.
    ///
    /// Default value: `0.0`.
    pub element_width: f64,

    /// Added to the tangent angle of each copy, in degrees.
    ///
    /// Default value: `0.0`.
    pub angle_offset_degrees: f64,
}

impl SamplingConfig {
    /// Default spacing.
    pub const DEFAULT_SPACING: f64 = 10.0;

    pub const DEFAULT: Self = SamplingConfig {
        spacing: Self::DEFAULT_SPACING,
        element_width: 0.0,
        angle_offset_degrees: 0.0,
    };

    #[inline]
    pub const fn spacing(spacing: f64) -> Self {
        Self::DEFAULT.with_spacing(spacing)
    }

    #[inline]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[inline]
    pub const fn with_element_width(mut self, width: f64) -> Self {
        self.element_width = width;
        self
    }

    #[inline]
    pub const fn with_angle_offset(mut self, degrees: f64) -> Self {
        self.angle_offset_degrees = degrees;
        self
    }

    /// Arc length between the starts of two consecutive copies.
    #[inline]
    pub fn step(&self) -> f64 {
        self.spacing + self.element_width
    }

    /// Checks every value on its own, without checking the step.
    ///
    /// Useful before the element width is known.
    pub fn validate_values(&self) -> Result<(), InvalidConfig> {
        check_field("spacing", self.spacing)?;
        check_field("element width", self.element_width)?;

        if !self.angle_offset_degrees.is_finite() {
            return Err(InvalidConfig::NonFinite {
                field: "angle offset",
                value: self.angle_offset_degrees,
            });
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.validate_values()?;

        let step = self.step();
        if !(step > 0.0) || !step.is_finite() {
            return Err(InvalidConfig::NonPositiveStep { step });
        }

        Ok(())
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn check_field(field: &'static str, value: f64) -> Result<(), InvalidConfig> {
    if !value.is_finite() {
        return Err(InvalidConfig::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(InvalidConfig::Negative { field, value });
    }

    Ok(())
}

/// Returns the distances at which copies are placed along the curve.
///
/// The configuration is validated before the curve is measured. Fails with
/// `InvalidConfig::TooManyPlacements` if the curve's length is not finite or if it
/// would take more than `MAX_PLACEMENTS` distances to cover it.
pub fn sample(curve: &Curve, config: &SamplingConfig) -> Result<Distances, InvalidConfig> {
    config.validate()?;

    Distances::new(curve.length(), config.step())
}

/// Iterator over the arc length distances `0, step, 2 * step, ...` up to the length
/// of a curve.
#[derive(Clone, Debug)]
pub struct Distances {
    step: f64,
    length: f64,
    index: usize,
    count: usize,
}

impl Distances {
    // Expects a positive, finite step and a non-negative length.
    fn new(length: f64, step: f64) -> Result<Self, InvalidConfig> {
        let too_many = InvalidConfig::TooManyPlacements { length, step };

        let last = (length / step).floor();
        if !length.is_finite() || !(last < MAX_PLACEMENTS as f64) {
            return Err(too_many);
        }

        // The division can be off by one ulp around exact multiples.
        let end = length + BOUNDARY_TOLERANCE * length.max(1.0);
        let mut last = last as usize;
        if (last as f64 + 1.0) * step <= end {
            last += 1;
        }
        while last > 0 && last as f64 * step > end {
            last -= 1;
        }

        let count = match last.checked_add(1) {
            Some(count) if count <= MAX_PLACEMENTS => count,
            _ => return Err(too_many),
        };

        Ok(Distances {
            step,
            length,
            index: 0,
            count,
        })
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn curve_length(&self) -> f64 {
        self.length
    }
}

impl Iterator for Distances {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }

        let distance = (self.index as f64 * self.step).min(self.length);
        self.index += 1;

        Some(distance)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Distances {}

impl std::iter::FusedIterator for Distances {}

#[cfg(test)]
use crate::path::CurveSegment;
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn horizontal_line(length: f64) -> Curve {
    Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(length, 0.0))]).unwrap()
}

#[test]
fn inclusive_end() {
    let curve = horizontal_line(100.0);
    let distances: Vec<f64> = sample(&curve, &SamplingConfig::spacing(10.0))
        .unwrap()
        .collect();

    assert_eq!(
        distances,
        vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
    );
}

#[test]
fn partial_last_step() {
    let curve = horizontal_line(95.0);
    let distances: Vec<f64> = sample(&curve, &SamplingConfig::spacing(10.0))
        .unwrap()
        .collect();

    assert_eq!(distances.len(), 10);
    assert_eq!(distances[9], 90.0);
}

#[test]
fn step_includes_element_width() {
    let curve = horizontal_line(100.0);
    let config = SamplingConfig::spacing(3.0).with_element_width(7.0);
    let distances = sample(&curve, &config).unwrap();

    assert_eq!(distances.step(), 10.0);
    assert_eq!(distances.len(), 11);
}

#[test]
fn rounding_at_exact_multiples() {
    // 0.9 / 0.3 == 2.9999999999999996
    let curve = horizontal_line(0.9);
    let distances: Vec<f64> = sample(&curve, &SamplingConfig::spacing(0.3))
        .unwrap()
        .collect();

    assert_eq!(distances.len(), 4);
    assert!(distances[3] <= curve.length());
    assert!((distances[3] - 0.9).abs() < 1e-12);

    // 0.7 / 0.1 == 6.999999999999999
    let curve = horizontal_line(0.7);
    let distances = sample(&curve, &SamplingConfig::spacing(0.1)).unwrap();
    assert_eq!(distances.len(), 8);
}

#[test]
fn zero_length_curve() {
    let curve = Curve::new(vec![CurveSegment::line(point(5.0, 5.0), point(5.0, 5.0))]).unwrap();
    let distances: Vec<f64> = sample(&curve, &SamplingConfig::DEFAULT).unwrap().collect();

    assert_eq!(distances, vec![0.0]);
}

#[test]
fn step_larger_than_curve() {
    let curve = horizontal_line(4.0);
    let distances: Vec<f64> = sample(&curve, &SamplingConfig::spacing(10.0))
        .unwrap()
        .collect();

    assert_eq!(distances, vec![0.0]);
}

#[test]
fn invalid_step() {
    let curve = horizontal_line(100.0);

    assert_eq!(
        sample(&curve, &SamplingConfig::spacing(0.0)).err(),
        Some(InvalidConfig::NonPositiveStep { step: 0.0 })
    );
    assert_eq!(
        sample(&curve, &SamplingConfig::spacing(-1.0)).err(),
        Some(InvalidConfig::Negative {
            field: "spacing",
            value: -1.0
        })
    );
    assert!(matches!(
        sample(&curve, &SamplingConfig::spacing(f64::NAN)),
        Err(InvalidConfig::NonFinite { .. })
    ));
    assert!(matches!(
        sample(&curve, &SamplingConfig::spacing(1.0).with_angle_offset(f64::INFINITY)),
        Err(InvalidConfig::NonFinite { .. })
    ));
}

#[test]
fn values_without_a_step() {
    // A zero step is only known to be wrong once the element width is known.
    assert_eq!(SamplingConfig::spacing(0.0).validate_values(), Ok(()));
    assert!(SamplingConfig::spacing(0.0).validate().is_err());

    assert_eq!(
        SamplingConfig::spacing(-1.0).validate_values(),
        Err(InvalidConfig::Negative {
            field: "spacing",
            value: -1.0
        })
    );
    assert!(matches!(
        SamplingConfig::spacing(1.0)
            .with_angle_offset(f64::NAN)
            .validate_values(),
        Err(InvalidConfig::NonFinite {
            field: "angle offset",
            ..
        })
    ));
}

#[test]
fn tiny_step() {
    let curve = horizontal_line(1.0);

    assert_eq!(
        sample(&curve, &SamplingConfig::spacing(1e-300)).err(),
        Some(InvalidConfig::TooManyPlacements {
            length: 1.0,
            step: 1e-300
        })
    );

    // Right at the limit.
    let step = 1.0 / (MAX_PLACEMENTS - 1) as f64;
    let distances = sample(&curve, &SamplingConfig::spacing(step)).unwrap();
    assert!(distances.len() <= MAX_PLACEMENTS);
    assert!(sample(&curve, &SamplingConfig::spacing(step / 2.0)).is_err());
}

#[test]
fn curve_too_long_to_measure() {
    // Finite coordinates whose distance overflows.
    let curve = Curve::new(vec![CurveSegment::line(
        point(-1e300, 0.0),
        point(1e300, 1e300),
    )])
    .unwrap();
    assert_eq!(curve.length(), f64::INFINITY);

    assert!(matches!(
        sample(&curve, &SamplingConfig::spacing(10.0)),
        Err(InvalidConfig::TooManyPlacements { .. })
    ));
}

#[test]
fn fresh_sequences() {
    let curve = horizontal_line(42.0);
    let config = SamplingConfig::spacing(4.0);

    let mut first = sample(&curve, &config).unwrap();
    first.next();
    first.next();
    assert_eq!(first.len(), 9);

    let a: Vec<f64> = sample(&curve, &config).unwrap().collect();
    let b: Vec<f64> = sample(&curve, &config).unwrap().collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 11);
}

#[test]
fn count_law() {
    for &(length, step) in &[(1.0, 0.25), (10.0, 3.0), (250.5, 12.5), (1e6, 7.0), (3.0, 0.1)] {
        let curve = horizontal_line(length);
        let distances = sample(&curve, &SamplingConfig::spacing(step)).unwrap();
        let expected = (length / step + 1e-9).floor() as usize + 1;
        assert_eq!(distances.len(), expected, "length {} step {}", length, step);

        let mut prev = -1.0;
        for d in distances {
            assert!(d > prev);
            assert!(d <= length);
            prev = d;
        }
    }
}
