//! ocr-lines-core: rebuild text lines from OCR fragments
//!
//! OCR engines report text in small fragments, each a quadrilateral plus the
//! recognised string. This crate decides which fragments share a line purely
//! from their vertical extents:
//!
//! 1. Each detection yields a padded extent `(top_left.y - pad, bottom_right.y + pad)`
//! 2. Extents are merged into disjoint bands (touching counts as overlapping)
//! 3. Each detection joins the band that covers it, keeping input order
//! 4. Each band renders as its labels joined by single spaces
//!
//! # Example
//!
//! ```
//! use ocr_lines_core::{reconstruct_lines, Detection, GroupingOptions, Quad};
//!
//! # fn main() -> ocr_lines_core::Result<()> {
//! let detections = vec![
//!     Detection::new(Quad::from_rect(0.0, 10.0, 50.0, 20.0), "Hello"),
//!     Detection::new(Quad::from_rect(60.0, 20.0, 50.0, 20.0), "World"),
//!     Detection::new(Quad::from_rect(0.0, 50.0, 50.0, 10.0), "Next"),
//! ];
//! let lines = reconstruct_lines(&detections, &GroupingOptions::default())?;
//! assert_eq!(lines, vec!["Hello World", "Next"]);
//! # Ok(())
//! # }
//! ```

pub mod detections;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grouping;
pub mod interval;
pub mod render;

#[cfg(feature = "tesseract")]
pub mod tesseract;

pub use detections::{load_detections, parse_detections};
pub use engine::{DetectionFile, EngineConfig, OcrEngine};
pub use error::{LinesError, Result};
pub use geometry::{Detection, Point, Quad};
pub use grouping::{group_by_bands, GroupingOptions, LineGroup, LineOrder, Padding};
pub use interval::{merge_intervals, Interval};
pub use render::{render_json, render_lines, render_text, RenderedLine};

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractEngine;

/// Group detections into lines and render each line as text
///
/// # Errors
///
/// Fails only on detections that violate the input contract, see
/// [`group_by_bands`].
pub fn reconstruct_lines(
    detections: &[Detection],
    options: &GroupingOptions,
) -> Result<Vec<String>> {
    let groups = group_by_bands(detections, options)?;
    Ok(render_lines(&groups))
}
