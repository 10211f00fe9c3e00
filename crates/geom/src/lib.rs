#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D segment primitives on top of euclid.
//!
//! This crate is reexported in [garland](../garland/index.html).
//!
//! # Overview
//!
//! This crate implements the maths needed to measure and sample:
//!
//! - line segments,
//! - cubic bézier segments.
//!
//! # Arc length
//!
//! Cubic bézier curves have no closed form arc length. `CubicBezierSegment::approximate_length`
//! recursively splits the curve until the length of each piece's control polygon and the
//! length of its chord agree within a relative tolerance, then integrates the derivative
//! magnitude of each accepted piece with a 5-point Gauss-Legendre rule.
//!
//! The tolerance is relative: with the default of `1e-4`, a piece is accepted once its
//! control polygon is at most 0.01% longer than its chord. Since accepted pieces are
//! integrated rather than approximated by their chords, the resulting error is several
//! orders of magnitude below the tolerance for typical curves.

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod cubic_bezier;
mod line;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::segment::Segment;

pub use crate::scalar::Scalar;

/// Relative tolerance used when measuring curves if none is specified.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 1e-4;

mod scalar {
    use num_traits::Float;

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + Sized
        + Display
        + Debug
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const THREE: Self;
        const SIX: Self;
        const NINE: Self;
        const TWELVE: Self;

        fn value(v: f64) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;
        const TWELVE: Self = 12.0;

        #[inline]
        fn value(v: f64) -> Self {
            v as f32
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;
        const TWELVE: Self = 12.0;

        #[inline]
        fn value(v: f64) -> Self {
            v
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod traits {
    pub use crate::segment::Segment;
}
