#![deny(bare_trait_objects)]

//! Place copies of an element along 2D curves.
//!
//! Garland lays out copies of an element (a leaf, a bead, a stitch) at regular
//! arc length intervals along a curve, each one rotated to follow the curve.
//!
//! # Crates
//!
//! This meta-crate reexports the following sub-crates for convenience:
//!
//! * [![crate](https://img.shields.io/crates/v/garland_geom.svg)](https://crates.io/crates/garland_geom)
//!   **garland_geom** - Line and cubic bézier segments with adaptive arc length measurement.
//! * [![crate](https://img.shields.io/crates/v/garland_path.svg)](https://crates.io/crates/garland_path)
//!   **garland_path** - Curves, their cached arc length tables and an SVG path data parser.
//! * [![crate](https://img.shields.io/crates/v/garland_algorithms.svg)](https://crates.io/crates/garland_algorithms)
//!   **garland_algorithms** - Sampling distances along a curve and orienting elements.
//! * [![crate](https://img.shields.io/crates/v/garland_placement.svg)](https://crates.io/crates/garland_placement)
//!   **garland_placement** - Driving a host document to create and transform the copies.
//!
//! Each `garland_<name>` crate is reexported as a `<name>` module in `garland`.
//!
//! # Arc length
//!
//! Curves are measured by adaptive subdivision with a relative tolerance of `1e-4`
//! (see `geom::DEFAULT_LENGTH_TOLERANCE`), each accepted piece being integrated with a
//! 5-point Gauss-Legendre quadrature. Over a long curve this keeps the spacing error of
//! the placed copies well below what can be seen. A different tolerance can be given
//! with `path::Curve::with_tolerance`.
//!
//! # Examples
//!
//! ```
//! use garland::path::parser::parse_curves;
//! use garland::algorithms::pattern::placements;
//! use garland::algorithms::sampler::SamplingConfig;
//!
//! let curves = parse_curves("M 10 10 C 60 -20 90 40 150 10").unwrap();
//! let config = SamplingConfig::spacing(12.0).with_angle_offset(90.0);
//!
//! for placement in placements(&curves[0], &config).unwrap() {
//!     println!(
//!         "distance {:.2}: ({:.2}, {:.2}) rotated {:.1}°",
//!         placement.distance,
//!         placement.position.x,
//!         placement.position.y,
//!         placement.rotation_degrees,
//!     );
//! }
//! ```
//!
//! Driving a host:
//!
//! ```
//! use garland::placement::{Job, MemoryHost, PlacementDriver};
//! use garland::path::parser::parse_curves;
//!
//! let mut host = MemoryHost::new();
//! host.add_bitmap("scan.png", parse_curves("M 0 0 L 90 0").unwrap().remove(0));
//! host.add_element_file("bead.svg", 6.0);
//!
//! let job = Job::DEFAULT.with_bitmap("scan.png").with_element("bead.svg");
//! let report = PlacementDriver::new().run_job(&mut host, &job).unwrap();
//!
//! // One copy every 10 units of spacing plus 6 units of element width.
//! assert_eq!(report.placed, 6);
//! ```

pub extern crate garland_placement;

pub use garland_placement as placement;
pub use placement::algorithms;
pub use placement::path;
pub use path::geom;

pub use path::math;
