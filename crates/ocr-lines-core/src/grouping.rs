//! Line grouping
//!
//! Each detection's padded vertical extent is merged with the others into
//! bands, then every detection is assigned to the band that covers it. One
//! band is one reconstructed line of text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{LinesError, Result};
use crate::geometry::Detection;
use crate::interval::{merge_intervals, Interval};

/// Vertical tolerance, in pixels, added above and below every detection
/// before merging. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Padding(f32);

impl Padding {
    /// Exact extents, fragments must overlap or touch to share a line
    pub const NONE: Self = Self(0.0);

    /// Two pixels of slack on each side
    pub const TOLERANT: Self = Self(2.0);

    /// Validate a padding value
    ///
    /// # Errors
    ///
    /// Returns [`LinesError::InvalidPadding`] for negative, NaN or infinite values.
    pub fn new(pixels: f32) -> Result<Self> {
        if pixels.is_finite() && pixels >= 0.0 {
            Ok(Self(pixels))
        } else {
            Err(LinesError::InvalidPadding(pixels))
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<f32> for Padding {
    type Error = LinesError;

    fn try_from(pixels: f32) -> Result<Self> {
        Self::new(pixels)
    }
}

impl From<Padding> for f32 {
    fn from(padding: Padding) -> Self {
        padding.0
    }
}

/// Order of detections inside one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineOrder {
    /// Keep the order the OCR engine emitted the fragments in
    #[default]
    Arrival,
    /// Stable-sort each line by the leftmost x of its fragments
    LeftToRight,
}

impl LineOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arrival => "arrival",
            Self::LeftToRight => "left-to-right",
        }
    }
}

impl fmt::Display for LineOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arrival" => Ok(Self::Arrival),
            "left-to-right" | "ltr" => Ok(Self::LeftToRight),
            other => Err(format!(
                "unknown line order '{other}' (expected 'arrival' or 'left-to-right')"
            )),
        }
    }
}

/// Knobs for [`group_by_bands`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingOptions {
    pub padding: Padding,
    pub order: LineOrder,
}

impl GroupingOptions {
    #[must_use]
    pub const fn with_padding(padding: Padding) -> Self {
        Self {
            padding,
            order: LineOrder::Arrival,
        }
    }
}

/// A band together with the detections that fall into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGroup {
    pub band: Interval,
    pub detections: Vec<Detection>,
}

impl LineGroup {
    /// Labels of the group's detections, in group order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.detections.iter().map(|d| d.label.as_str())
    }
}

/// Partition detections into line bands.
///
/// Groups come back ordered by band start; within a group detections keep
/// input order unless `options.order` asks for left-to-right. Every detection
/// lands in exactly one group.
///
/// # Errors
///
/// A detection with a non-finite y coordinate, or whose padded top lies below
/// its padded bottom, violates the input contract and is rejected with
/// [`LinesError::NonFiniteCoordinate`] or [`LinesError::InvertedExtent`].
pub fn group_by_bands(
    detections: &[Detection],
    options: &GroupingOptions,
) -> Result<Vec<LineGroup>> {
    let extents = detections
        .iter()
        .enumerate()
        .map(|(index, detection)| checked_extent(index, detection, options.padding))
        .collect::<Result<Vec<_>>>()?;

    let bands = merge_intervals(&extents);
    let mut members: Vec<Vec<Detection>> = vec![Vec::new(); bands.len()];

    for (detection, extent) in detections.iter().zip(&extents) {
        if let Some(slot) = bands.iter().position(|band| band.overlaps(extent)) {
            members[slot].push(detection.clone());
        }
    }

    let mut groups: Vec<LineGroup> = bands
        .into_iter()
        .zip(members)
        .filter(|(_, detections)| !detections.is_empty())
        .map(|(band, detections)| LineGroup { band, detections })
        .collect();

    if options.order == LineOrder::LeftToRight {
        for group in &mut groups {
            group
                .detections
                .sort_by(|a, b| a.quad.left().total_cmp(&b.quad.left()));
        }
    }

    debug!(
        "Grouped {} detections into {} lines (padding {}, order {})",
        detections.len(),
        groups.len(),
        options.padding.get(),
        options.order
    );

    Ok(groups)
}

fn checked_extent(index: usize, detection: &Detection, padding: Padding) -> Result<Interval> {
    let extent = detection.extent(padding);
    if !extent.start.is_finite() || !extent.end.is_finite() {
        return Err(LinesError::NonFiniteCoordinate { index });
    }
    if extent.start > extent.end {
        return Err(LinesError::InvertedExtent {
            index,
            start: extent.start,
            end: extent.end,
        });
    }
    Ok(extent)
}
