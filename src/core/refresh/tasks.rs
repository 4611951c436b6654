//! One-shot fetch tasks for the asynchronous feeds.
//!
//! Each task runs a single request against its feed, bounded by the
//! configured timeout, and reports back to the refresh loop over an mpsc
//! channel. A task that finishes after the loop is gone finds the channel
//! closed and drops its result.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::core::display::ActivityRings;
use crate::core::feeds::{ActivityFeed, Permission, WeatherFeed};
use crate::error::{Result, TermfaceError};

/// Feeds that need authorization before their first request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Activity,
    Weather,
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Activity => write!(f, "Activity"),
            FeedSource::Weather => write!(f, "Weather"),
        }
    }
}

/// Results sent from fetch tasks to the refresh loop.
#[derive(Debug)]
pub enum FeedUpdate {
    Authorized {
        source: FeedSource,
        permission: Permission,
    },
    Rings {
        generation: u64,
        result: Result<Option<ActivityRings>>,
    },
    Steps {
        generation: u64,
        result: Result<Option<u64>>,
    },
    /// Degrees Celsius
    Temperature {
        generation: u64,
        result: Result<f64>,
    },
}

async fn bounded<T, F>(limit: Duration, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => Err(TermfaceError::Timeout(limit)),
    }
}

async fn report(update_tx: &mpsc::Sender<FeedUpdate>, update: FeedUpdate) {
    if update_tx.send(update).await.is_err() {
        log::debug!("Refresh loop stopped; dropping late feed result");
    }
}

/// Ask for access once. Errors count as a denial; there is no re-prompt.
pub fn spawn_authorization<F>(source: FeedSource, request: F, update_tx: mpsc::Sender<FeedUpdate>)
where
    F: Future<Output = Result<Permission>> + Send + 'static,
{
    tokio::spawn(async move {
        let permission = request.await.unwrap_or_else(|e| {
            log::warn!("{} authorization failed: {}", source, e);
            Permission::Denied
        });

        report(&update_tx, FeedUpdate::Authorized { source, permission }).await;
    });
}

pub fn spawn_rings_fetch(
    feed: Arc<dyn ActivityFeed>,
    generation: u64,
    limit: Duration,
    update_tx: mpsc::Sender<FeedUpdate>,
) {
    tokio::spawn(async move {
        let result = bounded(limit, feed.fetch_daily_rings()).await;
        report(&update_tx, FeedUpdate::Rings { generation, result }).await;
    });
}

pub fn spawn_steps_fetch(
    feed: Arc<dyn ActivityFeed>,
    generation: u64,
    limit: Duration,
    update_tx: mpsc::Sender<FeedUpdate>,
) {
    tokio::spawn(async move {
        let result = bounded(limit, feed.fetch_step_count()).await;
        report(&update_tx, FeedUpdate::Steps { generation, result }).await;
    });
}

/// Re-resolve the location, then fetch the temperature there.
pub fn spawn_weather_fetch(
    feed: Arc<dyn WeatherFeed>,
    generation: u64,
    limit: Duration,
    update_tx: mpsc::Sender<FeedUpdate>,
) {
    tokio::spawn(async move {
        let result = bounded(limit, async {
            let location = feed.resolve_location().await?;
            feed.fetch_temperature(location).await
        })
        .await;
        report(&update_tx, FeedUpdate::Temperature { generation, result }).await;
    });
}
