//! Placing copies of an element along a curve.
//!
//! The driver turns the [`placements`] of an element into host calls: for every
//! placement one `duplicate` followed by one `set_transform`. Calls are made in
//! order, one at a time. The first failure stops the run and copies placed before
//! it are left in the document.
//!
//! A [`Job`] describes a whole run: obtain a curve (by tracing a bitmap or from
//! the selection), import the element, fill the curve with copies and delete the
//! imported element.
//!
//! ```
//! use garland_placement::{Job, MemoryHost, PlacementDriver};
//! use garland_placement::path::parser::parse_curves;
//! use garland_placement::algorithms::sampler::SamplingConfig;
//!
//! let mut host = MemoryHost::new();
//! host.select(parse_curves("M 0 0 L 100 0").unwrap().remove(0));
//! host.add_element_file("leaf.svg", 10.0);
//!
//! let job = Job::DEFAULT
//!     .with_trace(false)
//!     .with_element("leaf.svg")
//!     .with_sampling(SamplingConfig::spacing(0.0));
//!
//! let report = PlacementDriver::new().run_job(&mut host, &job).unwrap();
//! assert_eq!(report.placed, 11);
//! assert_eq!(host.duplicates().count(), 11);
//! ```

use crate::algorithms::pattern::placements;
use crate::algorithms::sampler::SamplingConfig;
use crate::host::{AssetProvider, ElementDescriptor, RasterTracer, SelectionProvider, TraceMode};
use crate::path::Curve;
use crate::{MissingInput, PlacementError};

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

/// Name of the batch a placement run is grouped in.
pub const BATCH_NAME: &str = "Place elements along curve";

/// Outcome of a placement run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of copies created and transformed.
    pub placed: usize,
    /// Whether the run stopped early because cancellation was requested.
    pub cancelled: bool,
}

/// Description of a complete run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Job {
    /// Trace `bitmap` to obtain the curve, instead of using the selection.
    ///
    /// Default value: `true`.
    pub trace: bool,
    pub bitmap: Option<PathBuf>,
    pub trace_mode: TraceMode,
    /// Place copies of `element` along the curve.
    ///
    /// Default value: `true`.
    pub fill: bool,
    pub element: Option<PathBuf>,
    /// The element width is measured by the host when the element is imported
    /// and replaces the configured one.
    pub sampling: SamplingConfig,
}

impl Job {
    pub const DEFAULT: Self = Job {
        trace: true,
        bitmap: None,
        trace_mode: TraceMode::Outline,
        fill: true,
        element: None,
        sampling: SamplingConfig::DEFAULT,
    };

    #[inline]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[inline]
    pub fn with_bitmap(mut self, bitmap: impl Into<PathBuf>) -> Self {
        self.bitmap = Some(bitmap.into());
        self
    }

    #[inline]
    pub fn with_trace_mode(mut self, mode: TraceMode) -> Self {
        self.trace_mode = mode;
        self
    }

    #[inline]
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    #[inline]
    pub fn with_element(mut self, element: impl Into<PathBuf>) -> Self {
        self.element = Some(element.into());
        self
    }

    #[inline]
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Checks that every input the job asks for is present.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if self.trace && self.bitmap.is_none() {
            return Err(PlacementError::MissingInput(MissingInput::Bitmap));
        }
        if self.fill && self.element.is_none() {
            return Err(PlacementError::MissingInput(MissingInput::Element));
        }

        Ok(())
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Places copies of elements along curves through a host.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlacementDriver<'l> {
    cancel: Option<&'l AtomicBool>,
}

impl<'l> PlacementDriver<'l> {
    pub fn new() -> Self {
        PlacementDriver { cancel: None }
    }

    /// The flag is checked before each placement. Once it is set the run stops
    /// and the copies already placed are kept.
    pub fn with_cancel_flag(flag: &'l AtomicBool) -> Self {
        PlacementDriver { cancel: Some(flag) }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Places one copy of `element` at each sampled distance along `curve`.
    ///
    /// The configuration is validated before any host call. The run is wrapped in
    /// a host batch which is closed on every exit path.
    pub fn place<A: AssetProvider + ?Sized>(
        &self,
        host: &mut A,
        curve: &Curve,
        element: &ElementDescriptor<A::Element>,
        config: &SamplingConfig,
    ) -> Result<RunReport, PlacementError> {
        let placements = placements(curve, config)?;
        let expected = placements.len();

        host.begin_batch(BATCH_NAME)?;

        let mut report = RunReport::default();
        let mut result = Ok(());
        for placement in placements {
            if self.is_cancelled() {
                warn!(
                    "Placement cancelled after {} of {} copies.",
                    report.placed, expected
                );
                report.cancelled = true;
                break;
            }

            result = host.duplicate(element).and_then(|duplicate| {
                host.set_transform(&duplicate, placement.position, placement.rotation_degrees)
            });
            if result.is_err() {
                break;
            }

            report.placed += 1;
            debug!(
                "Placed copy {} at distance {:.3}: {:?}, {:.3}°",
                report.placed, placement.distance, placement.position, placement.rotation_degrees,
            );
        }

        let end = host.end_batch();
        if let Err(error) = result {
            if let Err(end_error) = end {
                warn!("Failed to end the batch after an error: {}", end_error);
            }
            return Err(error);
        }
        end?;

        info!(
            "Placed {} copies along a curve of length {:.3} (step {:.3}).",
            report.placed,
            curve.length(),
            config.step()
        );

        Ok(report)
    }

    /// Runs a complete job.
    ///
    /// Missing inputs and invalid sampling values are reported before the host is
    /// called. The imported element is deleted exactly once, whether the run
    /// succeeds or not.
    pub fn run_job<H>(&self, host: &mut H, job: &Job) -> Result<RunReport, PlacementError>
    where
        H: AssetProvider + RasterTracer + SelectionProvider + ?Sized,
    {
        job.validate()?;
        if job.fill {
            job.sampling.validate_values()?;
        }

        let curve = match (job.trace, &job.bitmap) {
            (true, Some(bitmap)) => {
                debug!("Tracing {:?} ({:?})", bitmap, job.trace_mode);
                host.trace(bitmap, job.trace_mode)?
            }
            _ => host.selected_curve()?,
        };

        let element = match (job.fill, &job.element) {
            (true, Some(element)) => element,
            _ => {
                info!("Fill disabled, nothing to place.");
                return Ok(RunReport::default());
            }
        };

        let descriptor = host.import_element(element)?;
        let config = job.sampling.with_element_width(descriptor.width);
        let mut stencil = Stencil::new(host, descriptor);

        match self.place(&mut *stencil.host, &curve, &stencil.element, &config) {
            Ok(report) => {
                stencil.release()?;
                Ok(report)
            }
            Err(error) => Err(error),
        }
    }
}

/// An imported element used as the source of copies.
///
/// Deletes the element when released or dropped, whichever comes first.
struct Stencil<'h, A: AssetProvider + ?Sized> {
    host: &'h mut A,
    element: ElementDescriptor<A::Element>,
    released: bool,
}

impl<'h, A: AssetProvider + ?Sized> Stencil<'h, A> {
    fn new(host: &'h mut A, element: ElementDescriptor<A::Element>) -> Self {
        Stencil {
            host,
            element,
            released: false,
        }
    }

    fn release(mut self) -> Result<(), PlacementError> {
        self.released = true;
        self.host.delete_element(&self.element.handle)
    }
}

impl<'h, A: AssetProvider + ?Sized> Drop for Stencil<'h, A> {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(error) = self.host.delete_element(&self.element.handle) {
            warn!("Failed to delete the imported element: {}", error);
        }
    }
}
