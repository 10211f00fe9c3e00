use crate::algorithms::sampler::InvalidConfig;
use crate::path::InvalidCurve;

use std::path::PathBuf;

use thiserror::Error;

/// An input the job asked for but did not provide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MissingInput {
    /// Tracing was requested without a bitmap.
    Bitmap,
    /// Filling was requested without an element.
    Element,
}

impl std::fmt::Display for MissingInput {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MissingInput::Bitmap => write!(f, "a bitmap to trace"),
            MissingInput::Element => write!(f, "an element to place"),
        }
    }
}

/// Errors returned while placing elements along a curve.
///
/// Placement stops at the first error. Copies placed before it stay in the document.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PlacementError {
    #[error("Invalid curve: {0}")]
    InvalidCurve(#[from] InvalidCurve),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),
    #[error("Missing input: the job needs {0}.")]
    MissingInput(MissingInput),
    #[error("Tracing failed: {0}")]
    TraceFailed(String),
    #[error("Failed to import {path:?}: {reason}")]
    ImportFailed { path: PathBuf, reason: String },
    #[error("Nothing is selected.")]
    NoSelection,
    #[error("Could not connect to the host: {0}")]
    ConnectionFailed(String),
    #[error("Host operation failed: {0}")]
    HostOperation(String),
}
