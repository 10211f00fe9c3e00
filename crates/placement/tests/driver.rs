use garland_placement::algorithms::pattern::placements;
use garland_placement::algorithms::sampler::SamplingConfig;
use garland_placement::host::{AssetProvider, ElementDescriptor};
use garland_placement::math::{point, Point};
use garland_placement::memory::{HostCall, ObjectId};
use garland_placement::path::parser::parse_curves;
use garland_placement::path::Curve;
use garland_placement::*;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

fn line(length: f64) -> Curve {
    parse_curves(&format!("M 0 0 L {} 0", length)).unwrap().remove(0)
}

fn host_with_selection(curve: Curve) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.select(curve);
    host.add_element_file("leaf.svg", 10.0);
    host
}

fn fill_selection() -> Job {
    Job::DEFAULT
        .with_trace(false)
        .with_element("leaf.svg")
        .with_sampling(SamplingConfig::spacing(0.0))
}

#[test]
fn missing_bitmap() {
    let mut host = host_with_selection(line(100.0));
    let job = Job::DEFAULT.with_element("leaf.svg");

    let result = PlacementDriver::new().run_job(&mut host, &job);

    assert_eq!(result, Err(PlacementError::MissingInput(MissingInput::Bitmap)));
    assert!(host.calls().is_empty());
}

#[test]
fn missing_element() {
    let mut host = host_with_selection(line(100.0));
    host.add_bitmap("scan.png", line(50.0));
    let job = Job::DEFAULT.with_bitmap("scan.png");

    let result = PlacementDriver::new().run_job(&mut host, &job);

    assert_eq!(result, Err(PlacementError::MissingInput(MissingInput::Element)));
    assert!(host.calls().is_empty());
}

#[test]
fn fill_selected_curve() {
    let mut host = host_with_selection(line(100.0));

    let report = PlacementDriver::new()
        .run_job(&mut host, &fill_selection())
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            placed: 11,
            cancelled: false
        }
    );

    let positions: Vec<Point> = host.duplicates().map(|copy| copy.position).collect();
    let expected: Vec<Point> = (0..11).map(|i| point(i as f64 * 10.0, 0.0)).collect();
    assert_eq!(positions, expected);
    assert!(host.duplicates().all(|copy| copy.rotation_degrees == 0.0));

    // The imported element is gone, deleted exactly once.
    assert_eq!(host.elements().count(), 0);
    assert_eq!(host.deletions(ObjectId(0)), 1);
    assert!(!host.is_batch_open());
}

#[test]
fn call_order() {
    let mut host = MemoryHost::new();
    host.add_bitmap("scan.png", line(20.0));
    host.add_element_file("leaf.svg", 5.0);

    let job = Job::DEFAULT
        .with_bitmap("scan.png")
        .with_trace_mode(TraceMode::Host(3))
        .with_element("leaf.svg")
        .with_sampling(SamplingConfig::spacing(5.0));

    let report = PlacementDriver::new().run_job(&mut host, &job).unwrap();
    assert_eq!(report.placed, 3);

    let element = ObjectId(0);
    let expected = vec![
        HostCall::Trace {
            bitmap: "scan.png".into(),
            mode: TraceMode::Host(3),
        },
        HostCall::Import("leaf.svg".into()),
        HostCall::BeginBatch(driver::BATCH_NAME.to_string()),
        HostCall::Duplicate(element),
        HostCall::SetTransform {
            object: ObjectId(1),
            position: point(0.0, 0.0),
            rotation_degrees: 0.0,
        },
        HostCall::Duplicate(element),
        HostCall::SetTransform {
            object: ObjectId(2),
            position: point(10.0, 0.0),
            rotation_degrees: 0.0,
        },
        HostCall::Duplicate(element),
        HostCall::SetTransform {
            object: ObjectId(3),
            position: point(20.0, 0.0),
            rotation_degrees: 0.0,
        },
        HostCall::EndBatch,
        HostCall::Delete(element),
    ];

    assert_eq!(host.calls(), &expected[..]);
}

#[test]
fn placements_match_the_pattern() {
    let curve = parse_curves("M 0 0 C 0 50 50 50 50 0 S 100 -50 100 0")
        .unwrap()
        .remove(0);
    let mut host = host_with_selection(curve.clone());
    host.add_element_file("leaf.svg", 2.0);

    let sampling = SamplingConfig::spacing(3.0).with_angle_offset(90.0);
    let job = fill_selection().with_sampling(sampling);
    let report = PlacementDriver::new().run_job(&mut host, &job).unwrap();

    let expected: Vec<_> = placements(&curve, &sampling.with_element_width(2.0))
        .unwrap()
        .collect();
    assert_eq!(report.placed, expected.len());

    for (copy, placement) in host.duplicates().zip(expected.iter()) {
        assert_eq!(copy.position, placement.position);
        assert_eq!(copy.rotation_degrees, placement.rotation_degrees);
    }
}

#[test]
fn element_width_comes_from_the_host() {
    let mut host = host_with_selection(line(100.0));
    host.add_element_file("wide.svg", 25.0);

    // The configured width is replaced by the imported element's width.
    let job = fill_selection()
        .with_element("wide.svg")
        .with_sampling(SamplingConfig::spacing(0.0).with_element_width(1.0));
    let report = PlacementDriver::new().run_job(&mut host, &job).unwrap();

    assert_eq!(report.placed, 5);
}

#[test]
fn no_selection() {
    let mut host = MemoryHost::new();
    host.add_element_file("leaf.svg", 10.0);

    let result = PlacementDriver::new().run_job(&mut host, &fill_selection());

    assert_eq!(result, Err(PlacementError::NoSelection));
    assert_eq!(host.calls(), &[HostCall::SelectedCurve]);
}

#[test]
fn trace_failure() {
    let mut host = MemoryHost::new();
    host.add_element_file("leaf.svg", 10.0);

    let job = Job::DEFAULT.with_bitmap("scan.png").with_element("leaf.svg");
    let result = PlacementDriver::new().run_job(&mut host, &job);

    assert!(matches!(result, Err(PlacementError::TraceFailed(..))));
    assert_eq!(host.elements().count(), 0);
}

#[test]
fn import_failure() {
    let mut host = host_with_selection(line(100.0));

    let job = fill_selection().with_element("missing.svg");
    let result = PlacementDriver::new().run_job(&mut host, &job);

    assert!(matches!(result, Err(PlacementError::ImportFailed { .. })));
    assert_eq!(host.duplicates().count(), 0);
}

#[test]
fn trace_only() {
    let mut host = MemoryHost::new();
    host.add_bitmap("scan.png", line(100.0));

    let job = Job::DEFAULT.with_bitmap("scan.png").with_fill(false);
    let report = PlacementDriver::new().run_job(&mut host, &job).unwrap();

    assert_eq!(report, RunReport::default());
    assert_eq!(host.calls().len(), 1);
}

#[test]
fn failure_keeps_earlier_copies() {
    let mut host = host_with_selection(line(100.0));
    host.fail_duplicate_at(3);

    let result = PlacementDriver::new().run_job(&mut host, &fill_selection());

    assert!(matches!(result, Err(PlacementError::HostOperation(..))));
    assert_eq!(host.duplicates().count(), 3);
    assert_eq!(host.elements().count(), 0);
    assert_eq!(host.deletions(ObjectId(0)), 1);
    assert!(!host.is_batch_open());

    // No call is made after the failing one, apart from closing the batch and
    // deleting the stencil.
    let calls = host.calls();
    assert_eq!(calls[calls.len() - 3], HostCall::Duplicate(ObjectId(0)));
    assert_eq!(calls[calls.len() - 2], HostCall::EndBatch);
    assert_eq!(calls[calls.len() - 1], HostCall::Delete(ObjectId(0)));
}

#[test]
fn invalid_config_deletes_the_stencil() {
    let mut host = host_with_selection(line(100.0));
    host.add_element_file("empty.svg", 0.0);

    let job = fill_selection().with_element("empty.svg");
    let result = PlacementDriver::new().run_job(&mut host, &job);

    assert!(matches!(result, Err(PlacementError::InvalidConfig(..))));
    assert_eq!(host.duplicates().count(), 0);
    assert_eq!(host.elements().count(), 0);
    assert!(!host.calls().contains(&HostCall::BeginBatch(driver::BATCH_NAME.to_string())));
}

#[test]
fn invalid_values_are_reported_before_host_calls() {
    let mut host = host_with_selection(line(100.0));

    let job = fill_selection().with_sampling(SamplingConfig::spacing(-1.0));
    let result = PlacementDriver::new().run_job(&mut host, &job);
    assert!(matches!(result, Err(PlacementError::InvalidConfig(..))));
    assert!(host.calls().is_empty());

    let job = fill_selection().with_sampling(SamplingConfig::spacing(1.0).with_angle_offset(f64::NAN));
    let result = PlacementDriver::new().run_job(&mut host, &job);
    assert!(matches!(result, Err(PlacementError::InvalidConfig(..))));
    assert!(host.calls().is_empty());
}

#[test]
fn failed_batch_end_keeps_the_first_error() {
    let mut host = host_with_selection(line(100.0));
    host.fail_duplicate_at(2);
    host.fail_end_batch();

    let result = PlacementDriver::new().run_job(&mut host, &fill_selection());

    assert_eq!(
        result,
        Err(PlacementError::HostOperation("could not duplicate object 0".to_string()))
    );
    assert!(!host.is_batch_open());
    assert_eq!(host.deletions(ObjectId(0)), 1);
}

#[test]
fn failed_batch_end_is_reported() {
    let mut host = host_with_selection(line(100.0));
    host.fail_end_batch();

    let result = PlacementDriver::new().run_job(&mut host, &fill_selection());

    assert_eq!(
        result,
        Err(PlacementError::HostOperation("could not end the batch".to_string()))
    );
    assert_eq!(host.duplicates().count(), 11);
    assert_eq!(host.deletions(ObjectId(0)), 1);
}

#[test]
fn failed_deletion_is_reported() {
    let mut host = host_with_selection(line(100.0));
    host.fail_delete();

    let result = PlacementDriver::new().run_job(&mut host, &fill_selection());

    assert!(matches!(result, Err(PlacementError::HostOperation(..))));
    assert_eq!(host.duplicates().count(), 11);
    assert_eq!(host.deletions(ObjectId(0)), 1);
}

#[test]
fn cancelled_before_start() {
    let cancel = AtomicBool::new(true);
    let mut host = host_with_selection(line(100.0));

    let report = PlacementDriver::with_cancel_flag(&cancel)
        .run_job(&mut host, &fill_selection())
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            placed: 0,
            cancelled: true
        }
    );
    assert_eq!(host.duplicates().count(), 0);
    assert_eq!(host.elements().count(), 0);
}

// Requests cancellation once a number of copies were transformed.
struct CancellingHost<'l> {
    inner: MemoryHost,
    cancel: &'l AtomicBool,
    after: usize,
    transformed: usize,
}

impl<'l> AssetProvider for CancellingHost<'l> {
    type Element = ObjectId;
    type Duplicate = ObjectId;

    fn import_element(&mut self, path: &Path) -> Result<ElementDescriptor<ObjectId>, PlacementError> {
        self.inner.import_element(path)
    }

    fn duplicate(&mut self, element: &ElementDescriptor<ObjectId>) -> Result<ObjectId, PlacementError> {
        self.inner.duplicate(element)
    }

    fn set_transform(
        &mut self,
        duplicate: &ObjectId,
        position: Point,
        rotation_degrees: f64,
    ) -> Result<(), PlacementError> {
        self.inner.set_transform(duplicate, position, rotation_degrees)?;
        self.transformed += 1;
        if self.transformed == self.after {
            self.cancel.store(true, Ordering::Relaxed);
        }

        Ok(())
    }

    fn delete_element(&mut self, element: &ObjectId) -> Result<(), PlacementError> {
        self.inner.delete_element(element)
    }
}

#[test]
fn cancelled_mid_run() {
    let cancel = AtomicBool::new(false);
    let mut host = CancellingHost {
        inner: host_with_selection(line(100.0)),
        cancel: &cancel,
        after: 4,
        transformed: 0,
    };

    let curve = line(100.0);
    let element = host.import_element(Path::new("leaf.svg")).unwrap();
    let config = SamplingConfig::spacing(10.0);

    let report = PlacementDriver::with_cancel_flag(&cancel)
        .place(&mut host, &curve, &element, &config)
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            placed: 4,
            cancelled: true
        }
    );
    assert_eq!(host.inner.duplicates().count(), 4);
    // `place` leaves the element to the caller.
    assert_eq!(host.inner.elements().count(), 1);
}
