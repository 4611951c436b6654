//! Display model for the face.
//!
//! `DisplaySnapshot` is the immutable value handed to renderers; `format`
//! turns its fields into the strings shown on screen.

pub mod format;
mod snapshot;

pub use format::{battery_bar, battery_percent, format_clock, format_date, format_steps};
pub use snapshot::{ActivityRings, DisplaySnapshot, Temperature};
