//! Error types for line reconstruction.
//!
//! The grouping core is total over well-formed input. The variants below cover
//! precondition violations the caller handed in, malformed detection files, and
//! failures of the OCR engine that runs before the core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading detections or grouping them into lines.
#[derive(Error, Debug)]
pub enum LinesError {
    /// Padding must be a finite, non-negative number of pixels
    #[error("Invalid padding {0}: must be finite and non-negative")]
    InvalidPadding(f32),

    /// A detection's top-left or bottom-right y coordinate is NaN or infinite
    #[error("Detection #{index} has a non-finite y coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending detection in the input
        index: usize,
    },

    /// A detection's top edge lies below its bottom edge
    #[error("Detection #{index} has an inverted vertical extent ({start} > {end})")]
    InvertedExtent {
        /// Position of the offending detection in the input
        index: usize,
        /// Padded top of the extent
        start: f32,
        /// Padded bottom of the extent
        end: f32,
    },

    /// The detections document is not valid JSON or has an unknown shape
    #[error("Malformed detections: {0}")]
    MalformedDetections(#[from] serde_json::Error),

    /// Reading an input file failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The OCR engine failed to initialise or to recognise an image
    #[error("OCR engine error: {0}")]
    Engine(String),

    /// No OCR engine is compiled into this build
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LinesError>;
