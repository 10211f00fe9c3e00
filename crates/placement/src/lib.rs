#![deny(bare_trait_objects)]

//! Place copies of an element along a curve in a host document.
//!
//! The document lives in a host application reached through three capabilities:
//! an [`AssetProvider`] that imports, duplicates, moves and deletes objects, a
//! [`RasterTracer`] that turns bitmaps into curves and a [`SelectionProvider`]
//! that hands out the selected curve. The [`PlacementDriver`] computes the
//! placements with `garland_algorithms` and issues the host calls, one at a time.
//!
//! [`MemoryHost`] implements all three capabilities over an in-memory document.
//!
//! This crate is reexported in [garland](../garland/index.html).

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate garland_algorithms as algorithms;

pub mod driver;
mod error;
pub mod host;
pub mod memory;

pub use crate::algorithms::math;
pub use crate::algorithms::path;

#[doc(inline)]
pub use crate::driver::{Job, PlacementDriver, RunReport};
#[doc(inline)]
pub use crate::error::{MissingInput, PlacementError};
#[doc(inline)]
pub use crate::host::{AssetProvider, ElementDescriptor, RasterTracer, SelectionProvider, TraceMode};
#[doc(inline)]
pub use crate::memory::MemoryHost;
