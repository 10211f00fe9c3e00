#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Curves made of line and cubic bézier segments.
//!
//! A [`Curve`] is an immutable, contiguous sequence of segments. Arc length queries
//! (`length`, `position_at`, `tangent_at`) go through an [`ArcLengthTable`] that the
//! curve builds the first time it is measured and keeps for its whole lifetime.
//!
//! This crate is reexported in [garland](../garland/index.html).
//!
//! # Examples
//!
//! ```
//! use garland_path::builder::CurveBuilder;
//! use garland_path::math::point;
//!
//! let mut builder = CurveBuilder::new();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(100.0, 0.0));
//! builder.cubic_bezier_to(point(150.0, 0.0), point(150.0, 50.0), point(100.0, 50.0));
//! builder.end(false);
//!
//! let curves = builder.build().unwrap();
//! let curve = &curves[0];
//!
//! let mid = curve.position_at(curve.length() / 2.0);
//! println!("Mid-point: {:?}, tangent: {:?}", mid, curve.tangent_at(curve.length() / 2.0));
//! ```

pub use garland_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod curve;
pub mod measure;
pub mod parser;

#[doc(inline)]
pub use crate::curve::{Curve, CurveSegment, InvalidCurve, CONTIGUITY_TOLERANCE};
#[doc(inline)]
pub use crate::measure::{ArcLengthEntry, ArcLengthTable, Tangent, DEGENERATE_TANGENT_EPSILON};

pub mod math {
    //! f64 aliases of the geometry types, as used by curves.

    pub use crate::geom::{point, vector, Angle};

    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = crate::geom::Point<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = crate::geom::Vector<f64>;
}
