//! Reading OCR detections from JSON
//!
//! Two element shapes are accepted:
//! - PaddleOCR's raw result entry `[[[x, y] x4], ["text", score]]`
//! - the native `Detection` form `{"quad": {...}, "label": "..."}`
//!
//! The document is either a flat array of elements or PaddleOCR's per-page
//! wrapper `[[element, ...], ...]`. Only the first page is read, and a `null`
//! page (PaddleOCR's answer for an image without text) yields no detections.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{LinesError, Result};
use crate::geometry::{Detection, Quad};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDetection {
    /// Corner pairs plus `(text, score)`; the score is not used
    Paddle([[f32; 2]; 4], (String, f32)),
    Native(Detection),
}

impl From<RawDetection> for Detection {
    fn from(raw: RawDetection) -> Self {
        match raw {
            RawDetection::Paddle(corners, (label, _score)) => {
                Detection::new(Quad::from_corners(corners), label)
            }
            RawDetection::Native(detection) => detection,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Flat(Vec<RawDetection>),
    Pages(Vec<Option<Vec<RawDetection>>>),
}

/// Parse detections from a JSON string
///
/// # Errors
///
/// Returns [`LinesError::MalformedDetections`] if the text is not JSON or
/// matches none of the accepted shapes.
pub fn parse_detections(json: &str) -> Result<Vec<Detection>> {
    let raw = match serde_json::from_str::<RawDocument>(json) {
        Ok(RawDocument::Flat(items)) => items,
        Ok(RawDocument::Pages(pages)) => pages.into_iter().next().flatten().unwrap_or_default(),
        Err(_) => {
            // Re-parse strictly as a flat list for a precise error location
            serde_json::from_str::<Vec<RawDetection>>(json)?
        }
    };
    Ok(raw.into_iter().map(Detection::from).collect())
}

/// Load detections from a JSON file
///
/// # Errors
///
/// Returns [`LinesError::Io`] if the file cannot be read, or
/// [`LinesError::MalformedDetections`] if its contents do not parse.
pub fn load_detections(path: &Path) -> Result<Vec<Detection>> {
    let contents = std::fs::read_to_string(path).map_err(|source| LinesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let detections = parse_detections(&contents)?;
    debug!(
        "Loaded {} detections from {}",
        detections.len(),
        path.display()
    );
    Ok(detections)
}
