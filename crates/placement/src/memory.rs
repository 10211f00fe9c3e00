//! A host keeping its document in memory.
//!
//! `MemoryHost` records every call it receives and can be told to fail specific
//! operations. It backs the command line tool and the tests.

use crate::host::{AssetProvider, ElementDescriptor, RasterTracer, SelectionProvider, TraceMode};
use crate::math::{point, Point};
use crate::path::Curve;
use crate::PlacementError;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identifies an object of a `MemoryHost` document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// A call received by a `MemoryHost`, in the order it was made.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Trace { bitmap: PathBuf, mode: TraceMode },
    SelectedCurve,
    Import(PathBuf),
    Duplicate(ObjectId),
    SetTransform {
        object: ObjectId,
        position: Point,
        rotation_degrees: f64,
    },
    Delete(ObjectId),
    BeginBatch(String),
    EndBatch,
}

/// A copy of an element in the document.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCopy {
    pub id: ObjectId,
    pub source: ObjectId,
    pub position: Point,
    pub rotation_degrees: f64,
}

#[derive(Clone, Debug, PartialEq)]
enum Object {
    Element { path: PathBuf },
    Copy(PlacedCopy),
}

#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    bitmaps: HashMap<PathBuf, Curve>,
    element_files: HashMap<PathBuf, f64>,
    selection: Option<Curve>,
    objects: Vec<Option<Object>>,
    calls: Vec<HostCall>,
    duplicate_count: usize,
    fail_duplicate_at: Option<usize>,
    fail_delete: bool,
    fail_end_batch: bool,
    open_batches: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracing `path` will produce `curve`.
    pub fn add_bitmap(&mut self, path: impl Into<PathBuf>, curve: Curve) {
        self.bitmaps.insert(path.into(), curve);
    }

    /// Importing `path` will produce an element of the given width.
    pub fn add_element_file(&mut self, path: impl Into<PathBuf>, width: f64) {
        self.element_files.insert(path.into(), width);
    }

    pub fn select(&mut self, curve: Curve) {
        self.selection = Some(curve);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Makes the `n`-th call to `duplicate` (starting at zero) fail.
    pub fn fail_duplicate_at(&mut self, n: usize) {
        self.fail_duplicate_at = Some(n);
    }

    /// Makes every call to `delete_element` fail.
    pub fn fail_delete(&mut self) {
        self.fail_delete = true;
    }

    /// Makes every call to `end_batch` fail after closing the batch.
    pub fn fail_end_batch(&mut self) {
        self.fail_end_batch = true;
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Copies currently in the document, in creation order.
    pub fn duplicates(&self) -> impl Iterator<Item = &PlacedCopy> {
        self.objects.iter().filter_map(|object| match object {
            Some(Object::Copy(copy)) => Some(copy),
            _ => None,
        })
    }

    /// Imported elements currently in the document.
    pub fn elements(&self) -> impl Iterator<Item = (ObjectId, &Path)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, object)| match object {
                Some(Object::Element { path }) => Some((ObjectId(i), path.as_path())),
                _ => None,
            })
    }

    /// Number of `Delete` calls made for an object.
    pub fn deletions(&self, id: ObjectId) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == HostCall::Delete(id))
            .count()
    }

    pub fn is_batch_open(&self) -> bool {
        self.open_batches > 0
    }

    fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(Some(object));
        ObjectId(self.objects.len() - 1)
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object, PlacementError> {
        self.objects
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| PlacementError::HostOperation(format!("object {} does not exist", id.0)))
    }
}

impl AssetProvider for MemoryHost {
    type Element = ObjectId;
    type Duplicate = ObjectId;

    fn import_element(&mut self, path: &Path) -> Result<ElementDescriptor<ObjectId>, PlacementError> {
        self.calls.push(HostCall::Import(path.to_path_buf()));

        let width = match self.element_files.get(path) {
            Some(width) => *width,
            None => {
                return Err(PlacementError::ImportFailed {
                    path: path.to_path_buf(),
                    reason: "no such file".to_string(),
                });
            }
        };

        let handle = self.add_object(Object::Element {
            path: path.to_path_buf(),
        });

        Ok(ElementDescriptor { handle, width })
    }

    fn duplicate(&mut self, element: &ElementDescriptor<ObjectId>) -> Result<ObjectId, PlacementError> {
        self.calls.push(HostCall::Duplicate(element.handle));

        let n = self.duplicate_count;
        self.duplicate_count += 1;
        if self.fail_duplicate_at == Some(n) {
            return Err(PlacementError::HostOperation(format!(
                "could not duplicate object {}",
                element.handle.0
            )));
        }

        match self.object_mut(element.handle)? {
            Object::Element { .. } => {}
            Object::Copy(..) => {
                return Err(PlacementError::HostOperation(format!(
                    "object {} is not an imported element",
                    element.handle.0
                )));
            }
        }

        let id = ObjectId(self.objects.len());
        self.add_object(Object::Copy(PlacedCopy {
            id,
            source: element.handle,
            position: point(0.0, 0.0),
            rotation_degrees: 0.0,
        }));

        Ok(id)
    }

    fn set_transform(
        &mut self,
        duplicate: &ObjectId,
        position: Point,
        rotation_degrees: f64,
    ) -> Result<(), PlacementError> {
        self.calls.push(HostCall::SetTransform {
            object: *duplicate,
            position,
            rotation_degrees,
        });

        match self.object_mut(*duplicate)? {
            Object::Copy(copy) => {
                copy.position = position;
                copy.rotation_degrees = rotation_degrees;
                Ok(())
            }
            Object::Element { .. } => Err(PlacementError::HostOperation(format!(
                "object {} is not a copy",
                duplicate.0
            ))),
        }
    }

    fn delete_element(&mut self, element: &ObjectId) -> Result<(), PlacementError> {
        self.calls.push(HostCall::Delete(*element));

        if self.fail_delete {
            return Err(PlacementError::HostOperation(format!(
                "could not delete object {}",
                element.0
            )));
        }

        self.object_mut(*element)?;
        self.objects[element.0] = None;

        Ok(())
    }

    fn begin_batch(&mut self, name: &str) -> Result<(), PlacementError> {
        self.calls.push(HostCall::BeginBatch(name.to_string()));
        self.open_batches += 1;

        Ok(())
    }

    fn end_batch(&mut self) -> Result<(), PlacementError> {
        self.calls.push(HostCall::EndBatch);
        if self.open_batches == 0 {
            return Err(PlacementError::HostOperation("no batch to end".to_string()));
        }
        self.open_batches -= 1;
        if self.fail_end_batch {
            return Err(PlacementError::HostOperation("could not end the batch".to_string()));
        }

        Ok(())
    }
}

impl RasterTracer for MemoryHost {
    fn trace(&mut self, bitmap: &Path, mode: TraceMode) -> Result<Curve, PlacementError> {
        self.calls.push(HostCall::Trace {
            bitmap: bitmap.to_path_buf(),
            mode,
        });

        self.bitmaps
            .get(bitmap)
            .cloned()
            .ok_or_else(|| PlacementError::TraceFailed(format!("{:?} is not a traceable bitmap", bitmap)))
    }
}

impl SelectionProvider for MemoryHost {
    fn selected_curve(&mut self) -> Result<Curve, PlacementError> {
        self.calls.push(HostCall::SelectedCurve);

        self.selection.clone().ok_or(PlacementError::NoSelection)
    }
}

#[cfg(test)]
use crate::path::CurveSegment;

#[test]
fn import_and_delete() {
    let mut host = MemoryHost::new();
    host.add_element_file("star.svg", 4.0);

    let element = host.import_element(Path::new("star.svg")).unwrap();
    assert_eq!(element.width, 4.0);
    assert_eq!(host.elements().count(), 1);

    host.delete_element(&element.handle).unwrap();
    assert_eq!(host.elements().count(), 0);
    assert_eq!(host.deletions(element.handle), 1);

    // Deleting twice is an error.
    assert!(host.delete_element(&element.handle).is_err());
}

#[test]
fn unknown_files() {
    let mut host = MemoryHost::new();

    assert!(matches!(
        host.import_element(Path::new("missing.svg")),
        Err(PlacementError::ImportFailed { .. })
    ));
    assert!(matches!(
        host.trace(Path::new("missing.png"), TraceMode::Outline),
        Err(PlacementError::TraceFailed(..))
    ));
    assert_eq!(host.selected_curve(), Err(PlacementError::NoSelection));
}

#[test]
fn duplicate_and_transform() {
    let mut host = MemoryHost::new();
    host.add_element_file("star.svg", 4.0);
    let element = host.import_element(Path::new("star.svg")).unwrap();

    let copy = host.duplicate(&element).unwrap();
    host.set_transform(&copy, point(3.0, 4.0), 45.0).unwrap();

    let copies: Vec<&PlacedCopy> = host.duplicates().collect();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].id, copy);
    assert_eq!(copies[0].source, element.handle);
    assert_eq!(copies[0].position, point(3.0, 4.0));
    assert_eq!(copies[0].rotation_degrees, 45.0);

    // Copies can't be used as stencils and elements can't be transformed.
    let copy_descriptor = ElementDescriptor { handle: copy, width: 4.0 };
    assert!(host.duplicate(&copy_descriptor).is_err());
    assert!(host.set_transform(&element.handle, point(0.0, 0.0), 0.0).is_err());
}

#[test]
fn traced_curves() {
    let curve = Curve::new(vec![CurveSegment::line(point(0.0, 0.0), point(1.0, 0.0))]).unwrap();
    let mut host = MemoryHost::new();
    host.add_bitmap("scan.png", curve.clone());

    assert_eq!(host.trace(Path::new("scan.png"), TraceMode::Centerline), Ok(curve));
    assert_eq!(
        host.calls(),
        &[HostCall::Trace {
            bitmap: PathBuf::from("scan.png"),
            mode: TraceMode::Centerline
        }]
    );
}
