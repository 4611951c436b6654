use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One complete frame for the face. Rebuilt on every fast tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub timestamp: DateTime<Local>,
    pub activity_rings: ActivityRings,
    pub step_count: u64,
    pub temperature: Temperature,
    /// Always within [0, 1]
    pub battery_fraction: f64,
    pub cursor_visible: bool,
    /// False once the activity provider refused access for this session
    pub activity_available: bool,
}

impl DisplaySnapshot {
    pub fn new(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            activity_rings: ActivityRings::default(),
            step_count: 0,
            temperature: Temperature::Unavailable,
            battery_fraction: 0.0,
            cursor_visible: true,
            activity_available: true,
        }
    }
}

impl Default for DisplaySnapshot {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

/// Daily activity totals: energy (kcal), exercise (minutes), stand (count).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityRings {
    #[serde(rename = "move")]
    pub move_kcal: u32,
    pub exercise_minutes: u32,
    pub stand_count: u32,
}

impl ActivityRings {
    pub const fn new(move_kcal: u32, exercise_minutes: u32, stand_count: u32) -> Self {
        Self {
            move_kcal,
            exercise_minutes,
            stand_count,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Outdoor temperature as shown on the face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "celsius")]
pub enum Temperature {
    #[default]
    Unavailable,
    Celsius(i32),
}

impl Temperature {
    /// Whole degrees, truncated toward zero.
    pub fn from_celsius(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Temperature::Celsius(value.trunc() as i32))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Temperature::Celsius(_))
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Unavailable => write!(f, "--°C"),
            Temperature::Celsius(degrees) => write!(f, "{}°C", degrees),
        }
    }
}
