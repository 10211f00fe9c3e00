#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Distribute elements along curves.
//!
//! The [`sampler`] produces the arc length distances at which copies are placed,
//! [`orientation`] turns the curve's tangent at a distance into a rotation and
//! [`pattern`] combines both into [`Placement`](pattern::Placement) values.
//!
//! This crate is reexported in [garland](../garland/index.html).
//!
//! # Examples
//!
//! ```
//! use garland_algorithms::path::parser::parse_curves;
//! use garland_algorithms::pattern::placements;
//! use garland_algorithms::sampler::SamplingConfig;
//!
//! let curves = parse_curves("M 0 0 L 100 0").unwrap();
//! let config = SamplingConfig::DEFAULT
//!     .with_spacing(15.0)
//!     .with_element_width(5.0);
//!
//! for placement in placements(&curves[0], &config).unwrap() {
//!     println!("{:?} at {}°", placement.position, placement.rotation_degrees);
//! }
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate garland_path as path;

pub mod orientation;
pub mod pattern;
pub mod sampler;

pub use crate::path::geom;
pub use crate::path::math;
