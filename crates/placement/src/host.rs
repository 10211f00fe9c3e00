//! Capabilities of the document host the driver works against.
//!
//! The host owns the document: it imports and traces files, hands out the
//! selected curve and creates, moves and deletes objects. Calls into a host are
//! made one at a time, in placement order.

use crate::math::Point;
use crate::path::Curve;
use crate::PlacementError;

use std::path::Path;

/// How a bitmap is vectorized. Passed to the host as is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TraceMode {
    #[default]
    Outline,
    Centerline,
    /// A host specific trace type.
    Host(i32),
}

/// An element imported into the document, used as the stencil for copies.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementDescriptor<Handle> {
    pub handle: Handle,
    /// Bounding width of the element in document units.
    pub width: f64,
}

pub trait AssetProvider {
    /// Handle to an imported element.
    type Element;
    /// Handle to a copy of an element.
    type Duplicate;

    fn import_element(&mut self, path: &Path)
        -> Result<ElementDescriptor<Self::Element>, PlacementError>;

    fn duplicate(
        &mut self,
        element: &ElementDescriptor<Self::Element>,
    ) -> Result<Self::Duplicate, PlacementError>;

    /// Moves a copy to `position` and rotates it by `rotation_degrees`.
    fn set_transform(
        &mut self,
        duplicate: &Self::Duplicate,
        position: Point,
        rotation_degrees: f64,
    ) -> Result<(), PlacementError>;

    fn delete_element(&mut self, element: &Self::Element) -> Result<(), PlacementError>;

    /// Invoked before the first copy of a placement run.
    ///
    /// Hosts with an undo history can group the run into a single undo step.
    fn begin_batch(&mut self, _name: &str) -> Result<(), PlacementError> {
        Ok(())
    }

    /// Invoked after the last copy of a placement run, including failed and
    /// cancelled runs.
    fn end_batch(&mut self) -> Result<(), PlacementError> {
        Ok(())
    }
}

pub trait RasterTracer {
    /// Vectorizes a bitmap. Fails with `PlacementError::TraceFailed`.
    fn trace(&mut self, bitmap: &Path, mode: TraceMode) -> Result<Curve, PlacementError>;
}

pub trait SelectionProvider {
    /// The curve currently selected in the document. Fails with
    /// `PlacementError::NoSelection`.
    fn selected_curve(&mut self) -> Result<Curve, PlacementError>;
}
