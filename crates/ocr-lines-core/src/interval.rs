//! Closed numeric intervals and the sweep that coalesces them into bands.

use serde::{Deserialize, Serialize};

/// Closed range `[start, end]` on the y axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f32,
    pub end: f32,
}

impl Interval {
    /// Create a new interval
    #[inline]
    #[must_use = "interval is created but not used"]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Whether two closed intervals share at least one point
    #[inline]
    #[must_use = "overlap check result is returned but not used"]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Length of the interval (zero for degenerate intervals)
    #[inline]
    #[must_use = "length is computed but not used"]
    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    /// Whether the interval covers a single point
    #[inline]
    #[must_use = "emptiness check result is returned but not used"]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Coalesce intervals into the minimal set of disjoint intervals covering the
/// same union, sorted ascending by start.
///
/// Touching intervals (`next.start == current.end`) are merged. The input is
/// always re-sorted, callers need not pre-sort. Every input interval must
/// satisfy `start <= end`.
#[must_use = "merged intervals are returned but not used"]
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for current in sorted {
        debug_assert!(current.start <= current.end, "inverted interval {current:?}");
        match merged.last_mut() {
            Some(band) if current.start <= band.end => {
                band.end = band.end.max(current.end);
            }
            _ => merged.push(current),
        }
    }
    merged
}
