//! Refresh orchestration.
//!
//! Ties the clock, battery, activity and weather feeds into one stream of
//! immutable `DisplaySnapshot`s, tolerating feeds that are slow, stale or
//! permanently unavailable.

mod runtime;
mod state;
mod tasks;

pub use runtime::{RefreshOrchestrator, RefreshSettings};
pub use state::{Access, AccessLog, FeedState, RefreshState};
pub use tasks::{FeedSource, FeedUpdate};
