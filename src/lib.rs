// Termface Library - Public API

// Re-export error types
pub mod error;
pub use error::{ErrorKind, Result, TermfaceError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;
pub use core::{DisplaySnapshot, RefreshOrchestrator};

// Initialize logging; RUST_LOG still wins over the default level
pub fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
