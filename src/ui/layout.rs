//! Fixed text layout of the face, independent of any terminal backend.

use crate::core::config::DEFAULT_SHELL_PREFIX;
use crate::core::display::{
    battery_bar, battery_percent, format_clock, format_date, format_steps, DisplaySnapshot,
};

use super::theme::StyleSlot;

const PROMPT_PATH: &str = "~";
const PROMPT_SYMBOL: &str = "$";
const PROMPT_COMMAND: &str = "now";
const CURSOR: &str = "█";
const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceOptions {
    pub shell_prefix: String,
    pub battery_bar_width: usize,
}

impl Default for FaceOptions {
    fn default() -> Self {
        Self {
            shell_prefix: DEFAULT_SHELL_PREFIX.to_string(),
            battery_bar_width: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub slot: StyleSlot,
    /// Drawn directly after the previous segment, without the separating space
    pub joined: bool,
}

impl Segment {
    fn new(text: impl Into<String>, slot: StyleSlot) -> Self {
        Self {
            text: text.into(),
            slot,
            joined: false,
        }
    }

    /// Text to draw before this segment when it is the `index`th of its line
    pub fn separator(&self, index: usize) -> &'static str {
        if index == 0 || self.joined {
            ""
        } else {
            " "
        }
    }
}

/// One row of the face. Segments are separated by a single space unless
/// marked as joined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceLine {
    pub segments: Vec<Segment>,
}

impl FaceLine {
    fn push(mut self, text: impl Into<String>, slot: StyleSlot) -> Self {
        self.segments.push(Segment::new(text, slot));
        self
    }

    fn push_joined(mut self, text: impl Into<String>, slot: StyleSlot) -> Self {
        self.segments.push(Segment {
            joined: true,
            ..Segment::new(text, slot)
        });
        self
    }

    /// Text without styling
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            text.push_str(segment.separator(i));
            text.push_str(&segment.text);
        }
        text
    }
}

fn prompt(options: &FaceOptions, command: Option<&str>) -> FaceLine {
    let line = FaceLine::default()
        .push(options.shell_prefix.as_str(), StyleSlot::PromptUser)
        .push_joined(PROMPT_PATH, StyleSlot::PromptPath)
        .push(PROMPT_SYMBOL, StyleSlot::ValuePrimary);

    match command {
        Some(command) => line.push(command, StyleSlot::ValuePrimary),
        None => line,
    }
}

fn info(label: &str, value: impl Into<String>, slot: StyleSlot) -> FaceLine {
    FaceLine::default()
        .push(label, StyleSlot::Label)
        .push(value, slot)
}

fn rings(snapshot: &DisplaySnapshot) -> FaceLine {
    let line = FaceLine::default().push("Rings:", StyleSlot::Label);
    if !snapshot.activity_available {
        return line.push(MISSING, StyleSlot::ValuePrimary);
    }

    let rings = snapshot.activity_rings;
    line.push(rings.move_kcal.to_string(), StyleSlot::RingsMove)
        .push("-", StyleSlot::ValuePrimary)
        .push(rings.exercise_minutes.to_string(), StyleSlot::PromptUser)
        .push("-", StyleSlot::ValuePrimary)
        .push(rings.stand_count.to_string(), StyleSlot::RingsStand)
}

/// Build every row of the face for one snapshot.
pub fn face_lines(snapshot: &DisplaySnapshot, options: &FaceOptions) -> Vec<FaceLine> {
    let steps = if snapshot.activity_available {
        format_steps(snapshot.step_count)
    } else {
        MISSING.to_string()
    };

    let battery = format!(
        "{}% [{}]",
        battery_percent(snapshot.battery_fraction),
        battery_bar(snapshot.battery_fraction, options.battery_bar_width)
    );

    let cursor = snapshot.cursor_visible.then_some(CURSOR);

    vec![
        prompt(options, Some(PROMPT_COMMAND)),
        info("Time:", format_clock(&snapshot.timestamp), StyleSlot::ValuePrimary),
        info("Date:", format_date(&snapshot.timestamp), StyleSlot::ValuePrimary),
        rings(snapshot),
        info(
            "Temp:",
            snapshot.temperature.to_string(),
            StyleSlot::ValueTemperature,
        ),
        info("Steps:", steps, StyleSlot::ValuePrimary),
        info("Bat:", battery, StyleSlot::ValueBattery),
        prompt(options, cursor),
    ]
}
