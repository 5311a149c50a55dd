//! OCR engine seam
//!
//! Line reconstruction only consumes `(quad, text)` pairs. Whatever produces
//! them, a live OCR engine or a file of precomputed results, implements
//! [`OcrEngine`]. Engine failures are reported before grouping starts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::detections::load_detections;
use crate::error::Result;
use crate::geometry::Detection;

/// Source of text detections for an image
pub trait OcrEngine {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Initialise the engine without processing an image.
    ///
    /// Used to fetch or verify model data ahead of time.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be initialised.
    fn warm_up(&mut self) -> Result<()>;

    /// Detect and recognise text fragments in an image
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or recognition fails.
    fn detect(&mut self, image: &Path) -> Result<Vec<Detection>>;
}

/// Configuration for live OCR engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tesseract language codes (e.g., "eng", "chi_sim+eng")
    pub language: String,
    /// Page segmentation mode (see Tesseract PSM)
    pub page_segmentation_mode: u32,
    /// Minimum confidence threshold (0-100); lines below it are dropped
    pub min_confidence: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_segmentation_mode: 3, // PSM_AUTO (fully automatic)
            min_confidence: 0,
        }
    }
}

/// Engine that replays detections stored as JSON
///
/// The image path passed to [`OcrEngine::detect`] is ignored.
#[derive(Debug, Clone)]
pub struct DetectionFile {
    path: PathBuf,
}

impl DetectionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OcrEngine for DetectionFile {
    fn name(&self) -> &str {
        "detection-file"
    }

    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }

    fn detect(&mut self, _image: &Path) -> Result<Vec<Detection>> {
        load_detections(&self.path)
    }
}
