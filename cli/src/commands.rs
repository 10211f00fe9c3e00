use garland::algorithms::sampler::{InvalidConfig, SamplingConfig};
use garland::path::parser::ParseError;
use garland::path::Curve;
use garland::placement::PlacementError;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No input: pass an SVG path or --input FILE.")]
    NoInput,
    #[error("Cannot open file {path:?}: {source}")]
    Input { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid path data: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] InvalidConfig),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

pub struct MeasureCmd {
    pub curves: Vec<Curve>,
    pub output: Box<dyn io::Write>,
    /// Also report the position and tangent at this distance.
    pub at: Option<f64>,
}

pub struct SampleCmd {
    pub curves: Vec<Curve>,
    pub output: Box<dyn io::Write>,
    pub sampling: SamplingConfig,
    pub count: bool,
}

pub struct PlaceCmd {
    pub curves: Vec<Curve>,
    pub output: Box<dyn io::Write>,
    pub sampling: SamplingConfig,
}
