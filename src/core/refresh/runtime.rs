//! Refresh orchestrator: timers, feed requests and the snapshot stream.
//!
//! A single Tokio task owns all mutable state. Two interval timers drive it:
//! the fast one samples clock and battery, asks the activity feed for new
//! totals and emits a snapshot; the slow one re-resolves the weather. Fetch
//! results come back over an mpsc channel and are folded in between ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::state::{Access, AccessLog, RefreshState};
use super::tasks::{
    spawn_authorization, spawn_rings_fetch, spawn_steps_fetch, spawn_weather_fetch, FeedSource,
    FeedUpdate,
};
use crate::core::config::Config;
use crate::core::display::DisplaySnapshot;
use crate::core::feeds::Feeds;
use crate::error::{Result, TermfaceError};

const UPDATE_CHANNEL_CAPACITY: usize = 32;

type SnapshotCallback = Box<dyn Fn(&DisplaySnapshot) + Send + Sync>;

/// Timing knobs for the refresh loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    pub fast_interval: Duration,
    pub slow_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RefreshSettings {
    fn from(config: &Config) -> Self {
        Self {
            fast_interval: config.fast_interval(),
            slow_interval: config.slow_interval(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Consumers plus the gate that keeps them quiet after `stop()`.
struct Outlet {
    consumers: Mutex<Vec<SnapshotCallback>>,
    snapshot_tx: watch::Sender<Arc<DisplaySnapshot>>,
}

impl Outlet {
    fn emit(&self, active: &AtomicBool, snapshot: DisplaySnapshot) {
        let consumers = self.consumers.lock();
        if !active.load(Ordering::Acquire) {
            return;
        }

        let snapshot = Arc::new(snapshot);
        for consumer in consumers.iter() {
            consumer(&snapshot);
        }
        // Only fails without receivers, and `RefreshOrchestrator` keeps one.
        let _ = self.snapshot_tx.send(snapshot);
    }
}

struct Running {
    active: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

/// Drives the face: owns both timers and produces `DisplaySnapshot`s.
pub struct RefreshOrchestrator {
    settings: RefreshSettings,
    feeds: Feeds,
    outlet: Arc<Outlet>,
    snapshot_rx: watch::Receiver<Arc<DisplaySnapshot>>,
    running: Option<Running>,
    /// Set after the first start; later starts pick up the last snapshot
    resumable: bool,
    /// Authorization outcomes; each feed is asked at most once per orchestrator
    access: Arc<Mutex<AccessLog>>,
}

impl RefreshOrchestrator {
    pub fn new(config: &Config, feeds: Feeds) -> Self {
        Self::with_settings(RefreshSettings::from(config), feeds)
    }

    pub fn with_settings(settings: RefreshSettings, feeds: Feeds) -> Self {
        let initial = DisplaySnapshot::new(feeds.clock.now());
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial));

        Self {
            settings,
            feeds,
            outlet: Arc::new(Outlet {
                consumers: Mutex::new(Vec::new()),
                snapshot_tx,
            }),
            snapshot_rx,
            running: None,
            resumable: false,
            access: Arc::new(Mutex::new(AccessLog::default())),
        }
    }

    pub fn settings(&self) -> RefreshSettings {
        self.settings
    }

    /// Register a consumer called with every new snapshot.
    ///
    /// Callbacks run on the refresh task and must not call back into the
    /// orchestrator.
    pub fn on_snapshot<F>(&self, callback: F)
    where
        F: Fn(&DisplaySnapshot) + Send + Sync + 'static,
    {
        self.outlet.consumers.lock().push(Box::new(callback));
    }

    /// Watch channel always holding the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DisplaySnapshot>> {
        self.snapshot_rx.clone()
    }

    pub fn latest(&self) -> Arc<DisplaySnapshot> {
        self.snapshot_rx.borrow().clone()
    }

    /// Authorization state of `source` as last seen by the refresh loop.
    pub fn access(&self, source: FeedSource) -> Access {
        self.access.lock().get(source)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start both timers on the current Tokio runtime. Calling it again
    /// while running does nothing.
    pub fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            log::debug!("Refresh loop already running");
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            TermfaceError::runtime(format!("start() needs a Tokio runtime: {}", e))
        })?;

        let active = Arc::new(AtomicBool::new(true));
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let resumed = if self.resumable {
            RefreshState::resume_from(&self.latest())
        } else {
            RefreshState::new()
        };
        let state = resumed.with_access(&self.access.lock());
        self.resumable = true;

        let handle = runtime.spawn(refresh_loop(
            self.settings,
            self.feeds.clone(),
            state,
            Arc::clone(&self.outlet),
            Arc::clone(&self.access),
            Arc::clone(&active),
            shutdown_rx,
        ));

        log::info!(
            "Refresh loop started (fast {:?}, slow {:?})",
            self.settings.fast_interval,
            self.settings.slow_interval
        );

        self.running = Some(Running {
            active,
            shutdown_tx,
            handle,
        });
        Ok(())
    }

    /// Cancel both timers. No snapshot is emitted once this returns; fetches
    /// already in flight finish on their own and their results are dropped.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        {
            let _consumers = self.outlet.consumers.lock();
            running.active.store(false, Ordering::Release);
        }
        let _ = running.shutdown_tx.send(());
        running.handle.abort();

        log::info!("Refresh loop stopped");
    }
}

impl Drop for RefreshOrchestrator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn refresh_loop(
    settings: RefreshSettings,
    feeds: Feeds,
    mut state: RefreshState,
    outlet: Arc<Outlet>,
    access: Arc<Mutex<AccessLog>>,
    active: Arc<AtomicBool>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let (update_tx, mut update_rx) = mpsc::channel::<FeedUpdate>(UPDATE_CHANNEL_CAPACITY);

    if state.access(FeedSource::Activity) == Access::Pending {
        let activity = Arc::clone(&feeds.activity);
        spawn_authorization(
            FeedSource::Activity,
            async move { activity.authorize().await },
            update_tx.clone(),
        );
    }
    if state.access(FeedSource::Weather) == Access::Pending {
        let weather = Arc::clone(&feeds.weather);
        spawn_authorization(
            FeedSource::Weather,
            async move { weather.authorize().await },
            update_tx.clone(),
        );
    }

    let mut fast = interval(settings.fast_interval);
    fast.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut slow = interval(settings.slow_interval);
    slow.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            _ = shutdown.recv() => break,

            Some(update) = update_rx.recv() => {
                if !active.load(Ordering::Acquire) {
                    break;
                }
                let granted = match &update {
                    FeedUpdate::Authorized { source, .. } => Some(*source),
                    _ => None,
                };
                state.apply(update);
                access.lock().record(&state);

                // First request goes out as soon as access is known.
                match granted {
                    Some(FeedSource::Activity) => {
                        request_activity(&mut state, &feeds, settings, &update_tx)
                    }
                    Some(FeedSource::Weather) => {
                        request_weather(&mut state, &feeds, settings, &update_tx)
                    }
                    None => {}
                }
            }

            _ = fast.tick() => {
                if !active.load(Ordering::Acquire) {
                    break;
                }
                let timestamp = feeds.clock.now();
                let battery = feeds.battery.fraction();
                request_activity(&mut state, &feeds, settings, &update_tx);

                let snapshot = state.compose(timestamp, battery);
                log::trace!("Emitting snapshot at {}", snapshot.timestamp);
                outlet.emit(&active, snapshot);
            }

            _ = slow.tick() => {
                request_weather(&mut state, &feeds, settings, &update_tx);
            }
        }
    }

    log::debug!("Refresh loop exited");
}

fn request_activity(
    state: &mut RefreshState,
    feeds: &Feeds,
    settings: RefreshSettings,
    update_tx: &mpsc::Sender<FeedUpdate>,
) {
    if let Some(generation) = state.begin_rings() {
        spawn_rings_fetch(
            Arc::clone(&feeds.activity),
            generation,
            settings.request_timeout,
            update_tx.clone(),
        );
    }
    if let Some(generation) = state.begin_steps() {
        spawn_steps_fetch(
            Arc::clone(&feeds.activity),
            generation,
            settings.request_timeout,
            update_tx.clone(),
        );
    }
}

fn request_weather(
    state: &mut RefreshState,
    feeds: &Feeds,
    settings: RefreshSettings,
    update_tx: &mpsc::Sender<FeedUpdate>,
) {
    match state.begin_weather() {
        Some(generation) => spawn_weather_fetch(
            Arc::clone(&feeds.weather),
            generation,
            settings.request_timeout,
            update_tx.clone(),
        ),
        None => log::debug!("Weather refresh skipped; request pending or access not granted"),
    }
}
