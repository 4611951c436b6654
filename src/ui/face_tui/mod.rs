//! Full-screen terminal face.
//!
//! Draws each snapshot with ratatui on the alternate screen.

mod app;
mod render;

pub use app::{run_face_app, FaceApp};
pub use render::render_face;
