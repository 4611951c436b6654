//! Line-oriented output for pipes and plain terminals.

use crate::core::display::DisplaySnapshot;

use super::layout::{face_lines, FaceOptions};
use super::theme::Theme;

/// One frame as coloured text, one face row per line.
pub fn colored_frame(snapshot: &DisplaySnapshot, options: &FaceOptions, theme: &Theme) -> String {
    face_lines(snapshot, options)
        .iter()
        .map(|line| {
            let mut row = String::new();
            for (i, segment) in line.segments.iter().enumerate() {
                row.push_str(segment.separator(i));
                row.push_str(&theme.paint(&segment.text, segment.slot).to_string());
            }
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One frame as a single JSON line
pub fn json_frame(snapshot: &DisplaySnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}
