//! Geometric model of OCR detections
//!
//! Coordinates are image pixels with y growing downwards. Only the vertical
//! span of a detection takes part in line grouping.

use serde::{Deserialize, Serialize};

use crate::grouping::Padding;
use crate::interval::Interval;

/// A point in image-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    #[inline]
    #[must_use = "point is created but not used"]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral around a text fragment, in the corner order the OCR engine
/// reports: top-left, bottom-left, bottom-right, top-right.
///
/// No convexity or axis alignment is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub top_right: Point,
}

impl Quad {
    /// Create a quad from its four corners
    #[inline]
    #[must_use = "quad is created but not used"]
    pub const fn new(
        top_left: Point,
        bottom_left: Point,
        bottom_right: Point,
        top_right: Point,
    ) -> Self {
        Self {
            top_left,
            bottom_left,
            bottom_right,
            top_right,
        }
    }

    /// Build a quad from raw `[x, y]` corner pairs in engine order
    #[inline]
    #[must_use = "quad is created but not used"]
    pub const fn from_corners(corners: [[f32; 2]; 4]) -> Self {
        let [tl, bl, br, tr] = corners;
        Self::new(
            Point::new(tl[0], tl[1]),
            Point::new(bl[0], bl[1]),
            Point::new(br[0], br[1]),
            Point::new(tr[0], tr[1]),
        )
    }

    /// Build an axis-aligned quad from a rectangle
    #[inline]
    #[must_use = "quad is created but not used"]
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        let right = x + width;
        let bottom = y + height;
        Self::new(
            Point::new(x, y),
            Point::new(x, bottom),
            Point::new(right, bottom),
            Point::new(right, y),
        )
    }

    /// Leftmost x over all four corners
    #[inline]
    #[must_use = "left coordinate is computed but not used"]
    pub fn left(&self) -> f32 {
        self.top_left
            .x
            .min(self.bottom_left.x)
            .min(self.bottom_right.x)
            .min(self.top_right.x)
    }
}

/// One OCR result: where the text is and what it says
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub quad: Quad,
    pub label: String,
}

impl Detection {
    /// Create a new detection
    #[inline]
    #[must_use = "detection is created but not used"]
    pub fn new(quad: Quad, label: impl Into<String>) -> Self {
        Self {
            quad,
            label: label.into(),
        }
    }

    /// Padded vertical extent `(top_left.y - padding, bottom_right.y + padding)`
    #[inline]
    #[must_use = "extent is computed but not used"]
    pub fn extent(&self, padding: Padding) -> Interval {
        let pad = padding.get();
        Interval::new(
            self.quad.top_left.y - pad,
            self.quad.bottom_right.y + pad,
        )
    }
}
