// UI and formatting module

pub mod face_tui;
pub mod layout;
pub mod plain;
pub mod theme;

// Re-export commonly used items for cleaner imports
pub use layout::{face_lines, FaceLine, FaceOptions, Segment};
pub use plain::{colored_frame, json_frame};
pub use theme::{Rgb, StyleSlot, Theme};
