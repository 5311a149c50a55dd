//! Turning line groups into output text
//!
//! Labels are joined verbatim with a single space; no trimming, escaping or
//! normalisation is applied.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grouping::LineGroup;

/// One line per group, in band order
#[must_use = "rendered lines are returned but not used"]
pub fn render_lines(groups: &[LineGroup]) -> Vec<String> {
    groups
        .iter()
        .map(|group| group.labels().collect::<Vec<_>>().join(" "))
        .collect()
}

/// All lines joined with newlines, without a trailing newline
#[must_use = "rendered text is returned but not used"]
pub fn render_text(groups: &[LineGroup]) -> String {
    render_lines(groups).join("\n")
}

/// Machine-readable form of a reconstructed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedLine {
    /// Top of the line's band (padded)
    pub top: f32,
    /// Bottom of the line's band (padded)
    pub bottom: f32,
    /// Space-joined labels
    pub text: String,
    /// The individual labels, in line order
    pub labels: Vec<String>,
}

impl From<&LineGroup> for RenderedLine {
    fn from(group: &LineGroup) -> Self {
        let labels: Vec<String> = group.labels().map(str::to_owned).collect();
        Self {
            top: group.band.start,
            bottom: group.band.end,
            text: labels.join(" "),
            labels,
        }
    }
}

/// Render groups as a pretty-printed JSON array of [`RenderedLine`]
///
/// # Errors
///
/// Propagates `serde_json` serialization failures.
pub fn render_json(groups: &[LineGroup]) -> Result<String> {
    let lines: Vec<RenderedLine> = groups.iter().map(RenderedLine::from).collect();
    Ok(serde_json::to_string_pretty(&lines)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Detection, Quad};
    use crate::interval::Interval;

    fn group(start: f32, end: f32, labels: &[&str]) -> LineGroup {
        LineGroup {
            band: Interval::new(start, end),
            detections: labels
                .iter()
                .map(|l| Detection::new(Quad::from_rect(0.0, start, 1.0, end - start), *l))
                .collect(),
        }
    }

    #[test]
    fn test_render_empty() {
        assert!(render_lines(&[]).is_empty());
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_lines_joins_with_single_space() {
        let groups = [group(10.0, 40.0, &["Hello", "World"]), group(50.0, 60.0, &["Line2"])];
        assert_eq!(render_lines(&groups), vec!["Hello World", "Line2"]);
        assert_eq!(render_text(&groups), "Hello World\nLine2");
    }

    #[test]
    fn test_labels_are_not_normalised() {
        let groups = [group(0.0, 1.0, &[" padded ", "", "你好"])];
        assert_eq!(render_lines(&groups), vec![" padded   你好"]);
    }

    #[test]
    fn test_render_json() {
        let groups = [group(8.0, 32.0, &["top", "bottom"])];
        let json = render_json(&groups).unwrap();
        let parsed: Vec<RenderedLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            vec![RenderedLine {
                top: 8.0,
                bottom: 32.0,
                text: "top bottom".to_string(),
                labels: vec!["top".to_string(), "bottom".to_string()],
            }]
        );
    }
}
