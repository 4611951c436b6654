// Core logic: configuration, display model, feeds and the refresh loop

pub mod config;
pub mod display;
pub mod feeds;
pub mod refresh;

// Re-export commonly used items
pub use config::Config;
pub use display::{ActivityRings, DisplaySnapshot, Temperature};
pub use refresh::{RefreshOrchestrator, RefreshSettings};
