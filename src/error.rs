//! Error types for loading, scoring and rendering

use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop a run (or, for per-file variants, skip a file)
#[derive(Error, Debug)]
pub enum Error {
    /// Band limits out of order or not finite
    #[error("invalid band: fmin ({fmin} Hz) and fmax ({fmax} Hz) must be finite with fmin < fmax")]
    InvalidBand { fmin: f64, fmax: f64 },

    /// Input folder does not exist
    #[error("input folder not found: {0}")]
    MissingInputDir(PathBuf),

    /// Filesystem failure on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A measurement file could not be interpreted
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Input folder holds no `.ini` files at all
    #[error("no .ini files found in {0}")]
    NoInputFiles(PathBuf),

    /// Every `.ini` file in the input folder was skipped
    #[error("no valid .ini data loaded from {0}")]
    NoValidData(PathBuf),

    /// Chart rendering failed
    #[error("failed to render plot {path}: {reason}")]
    Plot { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a measurement file is rejected
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("no curve data")]
    NoCurveData,

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("line {line}: expected 'F:<freq>,<value>[,<value>]', got '{text}'")]
    MalformedPoint { line: usize, text: String },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: expected {expected} values per point, found {found}")]
    InconsistentColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{frequencies} frequencies but {samples} S11 samples")]
    LengthMismatch { frequencies: usize, samples: usize },

    #[error("frequency {freq_hz} Hz at point {index} is not above the previous point")]
    NonIncreasingFrequency { index: usize, freq_hz: f64 },

    #[error("non-finite value at point {index}")]
    NonFinite { index: usize },

    #[error("VSWR {value} at point {index} is below 1")]
    InvalidVswr { index: usize, value: f64 },

    #[error("unknown data format '{0}' (expected VSWR, RI, MA or DB)")]
    UnknownFormat(String),

    #[error("format {format} needs {expected} values per point, found {found}")]
    FormatColumns {
        format: &'static str,
        expected: usize,
        found: usize,
    },
}
