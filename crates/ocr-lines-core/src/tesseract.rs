//! Tesseract-backed OCR engine
//!
//! Word-level component boxes are recognised one by one and reported as
//! axis-aligned detections in image-pixel coordinates. Requires Tesseract 5.x
//! with the configured language data installed.

use image::RgbImage;
use leptess::{LepTess, Variable};
use std::path::Path;
use tracing::debug;

use crate::engine::{EngineConfig, OcrEngine};
use crate::error::{LinesError, Result};
use crate::geometry::{Detection, Quad};

/// OCR engine using Tesseract through `leptess`
pub struct TesseractEngine {
    config: EngineConfig,
}

impl TesseractEngine {
    /// Create a new Tesseract engine
    ///
    /// # Errors
    ///
    /// Returns [`LinesError::Engine`] if Tesseract cannot be initialised with
    /// the configured language.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let mut engine = Self { config };
        engine.warm_up()?;
        Ok(engine)
    }

    fn init(&self) -> Result<LepTess> {
        let mut lt = LepTess::new(None, &self.config.language).map_err(|e| {
            LinesError::Engine(format!(
                "Failed to initialize Tesseract with language '{}': {}. \
                 Make sure language data is installed (e.g., 'apt install tesseract-ocr-eng')",
                self.config.language, e
            ))
        })?;

        lt.set_variable(
            Variable::TesseditPagesegMode,
            &self.config.page_segmentation_mode.to_string(),
        )
        .map_err(|e| LinesError::Engine(format!("Failed to set PSM: {e}")))?;

        Ok(lt)
    }

    fn recognize(&self, image: &RgbImage) -> Result<Vec<Detection>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(LinesError::Engine(format!(
                "Image dimensions must be non-zero (got {width}x{height})"
            )));
        }

        let mut lt = self.init()?;

        // leptess decodes the image itself, so hand it PNG bytes
        let mut png_buf = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut png_buf, image::ImageFormat::Png)
            .map_err(|e| LinesError::Engine(format!("Failed to encode image to PNG: {e}")))?;
        lt.set_image_from_mem(png_buf.get_ref())
            .map_err(|e| LinesError::Engine(format!("Failed to set image from memory: {e}")))?;

        // None means the page has no text at all
        let Some(boxes) =
            lt.get_component_boxes(leptess::capi::TessPageIteratorLevel_RIL_WORD, true)
        else {
            return Ok(Vec::new());
        };

        let mut detections = Vec::new();
        for bbox in &boxes {
            let geom = bbox.get_geometry();
            lt.set_rectangle(geom.x, geom.y, geom.w, geom.h);

            let text = lt.get_utf8_text().unwrap_or_default().trim().to_string();
            if text.is_empty() {
                continue;
            }

            let confidence = lt.mean_text_conf();
            if confidence < self.config.min_confidence {
                debug!("Dropping '{}' (confidence {}%)", text, confidence);
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let quad = Quad::from_rect(geom.x as f32, geom.y as f32, geom.w as f32, geom.h as f32);
            detections.push(Detection::new(quad, text));
        }

        Ok(detections)
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn warm_up(&mut self) -> Result<()> {
        self.init().map(|_| ())
    }

    fn detect(&mut self, image: &Path) -> Result<Vec<Detection>> {
        let img = image::open(image)
            .map_err(|e| {
                LinesError::Engine(format!("Failed to open image {}: {e}", image.display()))
            })?
            .to_rgb8();
        let detections = self.recognize(&img)?;
        debug!(
            "Tesseract found {} fragments in {}",
            detections.len(),
            image.display()
        );
        Ok(detections)
    }
}
