// Scripted feeds for driving the refresh loop under paused Tokio time

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone};
use parking_lot::Mutex;
use tokio::sync::Notify;

use termface::core::display::{ActivityRings, DisplaySnapshot};
use termface::core::feeds::{
    ActivityFeed, BatteryGauge, ClockSource, Coordinate, Feeds, Permission, WeatherFeed,
};
use termface::core::refresh::RefreshSettings;
use termface::{Result, TermfaceError};

pub const PARIS: Coordinate = Coordinate {
    latitude: 48.85,
    longitude: 2.35,
};

pub fn settings(fast_ms: u64, slow_ms: u64, timeout_ms: u64) -> RefreshSettings {
    RefreshSettings {
        fast_interval: std::time::Duration::from_millis(fast_ms),
        slow_interval: std::time::Duration::from_millis(slow_ms),
        request_timeout: std::time::Duration::from_millis(timeout_ms),
    }
}

/// Advances one second per read.
pub struct SteppingClock {
    base: DateTime<Local>,
    reads: AtomicU64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            base: Local.with_ymd_and_hms(2026, 10, 19, 21, 5, 0).unwrap(),
            reads: AtomicU64::new(0),
        }
    }
}

impl ClockSource for SteppingClock {
    fn now(&self) -> DateTime<Local> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.base + ChronoDuration::seconds(n as i64)
    }
}

pub struct FixedBattery(pub f64);

impl BatteryGauge for FixedBattery {
    fn fraction(&self) -> f64 {
        self.0
    }
}

/// Activity feed whose answers the test changes while the loop runs.
pub struct ScriptedActivity {
    pub permission: Permission,
    pub rings: Mutex<Option<ActivityRings>>,
    pub steps: Mutex<Option<u64>>,
    pub fetches: AtomicUsize,
    pub authorizations: AtomicUsize,
    /// Number of step requests that never answer before the rest do.
    pub hanging_steps: AtomicUsize,
}

impl ScriptedActivity {
    pub fn new(rings: Option<ActivityRings>, steps: Option<u64>) -> Self {
        Self {
            permission: Permission::Granted,
            rings: Mutex::new(rings),
            steps: Mutex::new(steps),
            fetches: AtomicUsize::new(0),
            authorizations: AtomicUsize::new(0),
            hanging_steps: AtomicUsize::new(0),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            ..Self::new(None, None)
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn authorize_count(&self) -> usize {
        self.authorizations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityFeed for ScriptedActivity {
    async fn authorize(&self) -> Result<Permission> {
        self.authorizations.fetch_add(1, Ordering::SeqCst);
        Ok(self.permission)
    }

    async fn fetch_daily_rings(&self) -> Result<Option<ActivityRings>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(*self.rings.lock())
    }

    async fn fetch_step_count(&self) -> Result<Option<u64>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let hang = self
            .hanging_steps
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(*self.steps.lock())
    }
}

/// Activity feed whose step requests wait for the test to open a gate.
pub struct GatedActivity {
    pub gate: Arc<Notify>,
}

#[async_trait]
impl ActivityFeed for GatedActivity {
    async fn authorize(&self) -> Result<Permission> {
        Ok(Permission::Granted)
    }

    async fn fetch_daily_rings(&self) -> Result<Option<ActivityRings>> {
        Ok(Some(ActivityRings::new(100, 10, 2)))
    }

    async fn fetch_step_count(&self) -> Result<Option<u64>> {
        self.gate.notified().await;
        Ok(Some(1_234))
    }
}

/// Weather feed answering from a queue; an empty queue is a transient failure.
pub struct ScriptedWeather {
    pub permission: Permission,
    pub answers: Mutex<VecDeque<Result<f64>>>,
    pub fetches: AtomicUsize,
    pub authorizations: AtomicUsize,
}

impl ScriptedWeather {
    pub fn new(answers: Vec<Result<f64>>) -> Self {
        Self {
            permission: Permission::Granted,
            answers: Mutex::new(answers.into()),
            fetches: AtomicUsize::new(0),
            authorizations: AtomicUsize::new(0),
        }
    }

    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            ..Self::silent()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn authorize_count(&self) -> usize {
        self.authorizations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherFeed for ScriptedWeather {
    async fn authorize(&self) -> Result<Permission> {
        self.authorizations.fetch_add(1, Ordering::SeqCst);
        Ok(self.permission)
    }

    async fn resolve_location(&self) -> Result<Coordinate> {
        Ok(PARIS)
    }

    async fn fetch_temperature(&self, _location: Coordinate) -> Result<f64> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TermfaceError::other("forecast service unreachable")))
    }
}

/// Grants access but never answers a single fetch.
pub struct SilentFeed;

#[async_trait]
impl ActivityFeed for SilentFeed {
    async fn authorize(&self) -> Result<Permission> {
        Ok(Permission::Granted)
    }

    async fn fetch_daily_rings(&self) -> Result<Option<ActivityRings>> {
        std::future::pending().await
    }

    async fn fetch_step_count(&self) -> Result<Option<u64>> {
        std::future::pending().await
    }
}

#[async_trait]
impl WeatherFeed for SilentFeed {
    async fn authorize(&self) -> Result<Permission> {
        Ok(Permission::Granted)
    }

    async fn resolve_location(&self) -> Result<Coordinate> {
        std::future::pending().await
    }

    async fn fetch_temperature(&self, _location: Coordinate) -> Result<f64> {
        std::future::pending().await
    }
}

pub fn feeds(activity: Arc<dyn ActivityFeed>, weather: Arc<dyn WeatherFeed>) -> Feeds {
    Feeds::new(
        Arc::new(SteppingClock::new()),
        Arc::new(FixedBattery(0.42)),
        activity,
        weather,
    )
}

/// Collects every snapshot handed to a consumer.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<DisplaySnapshot>>>,
}

impl Recorder {
    pub fn callback(&self) -> impl Fn(&DisplaySnapshot) + Send + Sync + 'static {
        let seen = Arc::clone(&self.seen);
        move |snapshot: &DisplaySnapshot| seen.lock().push(snapshot.clone())
    }

    pub fn snapshots(&self) -> Vec<DisplaySnapshot> {
        self.seen.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }
}
