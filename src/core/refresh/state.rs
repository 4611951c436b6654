//! Feed bookkeeping and snapshot composition.
//!
//! Everything here is plain data owned by the refresh loop. Nothing is
//! shared across threads, so applying an update and composing a snapshot
//! are each a single atomic step from a consumer's point of view.

use chrono::{DateTime, Local};

use super::tasks::{FeedSource, FeedUpdate};
use crate::core::display::format::clamp_fraction;
use crate::core::display::{ActivityRings, DisplaySnapshot, Temperature};
use crate::core::feeds::Permission;
use crate::error::{ErrorKind, TermfaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Pending,
    Granted,
    Denied,
}

impl From<Permission> for Access {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::Granted => Access::Granted,
            Permission::Denied => Access::Denied,
        }
    }
}

/// Authorization outcome per feed, kept across runs of the refresh loop so
/// access is only ever requested once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessLog {
    activity: Access,
    weather: Access,
}

impl Default for AccessLog {
    fn default() -> Self {
        Self {
            activity: Access::Pending,
            weather: Access::Pending,
        }
    }
}

impl AccessLog {
    pub fn get(&self, source: FeedSource) -> Access {
        match source {
            FeedSource::Activity => self.activity,
            FeedSource::Weather => self.weather,
        }
    }

    /// Copy the current access of every feed out of `state`.
    pub fn record(&mut self, state: &RefreshState) {
        self.activity = state.access(FeedSource::Activity);
        self.weather = state.access(FeedSource::Weather);
    }
}

/// Last known value of one feed plus the request currently out for it.
#[derive(Debug, Clone)]
pub struct FeedState<T> {
    value: T,
    in_flight: bool,
    generation: u64,
    access: Access,
}

impl<T> FeedState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            in_flight: false,
            generation: 0,
            access: Access::Pending,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn set_access(&mut self, access: Access) {
        // Denial sticks for the rest of the session.
        if self.access != Access::Denied {
            self.access = access;
        }
    }

    /// Reserve the next request. `None` while one is outstanding or access
    /// has not been granted.
    pub fn begin(&mut self) -> Option<u64> {
        if self.in_flight || self.access != Access::Granted {
            return None;
        }
        self.generation += 1;
        self.in_flight = true;
        Some(self.generation)
    }

    /// Close the request `generation`. Returns false for superseded results.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

/// All state behind the snapshot stream.
#[derive(Debug, Clone)]
pub struct RefreshState {
    rings: FeedState<ActivityRings>,
    steps: FeedState<u64>,
    temperature: FeedState<Temperature>,
    cursor_visible: bool,
}

impl Default for RefreshState {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshState {
    pub fn new() -> Self {
        Self {
            rings: FeedState::new(ActivityRings::default()),
            steps: FeedState::new(0),
            temperature: FeedState::new(Temperature::Unavailable),
            cursor_visible: true,
        }
    }

    /// Carry the feed values of an earlier run over into a new one.
    pub fn resume_from(snapshot: &DisplaySnapshot) -> Self {
        let mut state = Self::new();
        state.rings.set(snapshot.activity_rings);
        state.steps.set(snapshot.step_count);
        state.temperature.set(snapshot.temperature);
        state.cursor_visible = !snapshot.cursor_visible;
        if !snapshot.activity_available {
            state.rings.set_access(Access::Denied);
            state.steps.set_access(Access::Denied);
        }
        state
    }

    /// Restore access settled by an earlier run.
    pub fn with_access(mut self, log: &AccessLog) -> Self {
        for source in [FeedSource::Activity, FeedSource::Weather] {
            let access = log.get(source);
            if access != Access::Pending {
                self.set_access(source, access);
            }
        }
        self
    }

    pub fn rings(&self) -> &FeedState<ActivityRings> {
        &self.rings
    }

    pub fn steps(&self) -> &FeedState<u64> {
        &self.steps
    }

    pub fn temperature(&self) -> &FeedState<Temperature> {
        &self.temperature
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn begin_rings(&mut self) -> Option<u64> {
        self.rings.begin()
    }

    pub fn begin_steps(&mut self) -> Option<u64> {
        self.steps.begin()
    }

    pub fn begin_weather(&mut self) -> Option<u64> {
        self.temperature.begin()
    }

    pub fn access(&self, source: FeedSource) -> Access {
        match source {
            FeedSource::Activity => self.rings.access(),
            FeedSource::Weather => self.temperature.access(),
        }
    }

    /// Build the frame for this tick and flip the cursor for the next one.
    pub fn compose(
        &mut self,
        timestamp: DateTime<Local>,
        battery_fraction: f64,
    ) -> DisplaySnapshot {
        let snapshot = DisplaySnapshot {
            timestamp,
            activity_rings: *self.rings.value(),
            step_count: *self.steps.value(),
            temperature: *self.temperature.value(),
            battery_fraction: clamp_fraction(battery_fraction),
            cursor_visible: self.cursor_visible,
            activity_available: self.rings.access() != Access::Denied,
        };
        self.cursor_visible = !self.cursor_visible;
        snapshot
    }

    /// Fold one asynchronous result into the feed state.
    ///
    /// Returns false when the result was discarded as superseded.
    pub fn apply(&mut self, update: FeedUpdate) -> bool {
        match update {
            FeedUpdate::Authorized { source, permission } => {
                self.authorize(source, permission);
                true
            }
            FeedUpdate::Rings { generation, result } => {
                if !self.rings.finish(generation) {
                    log::debug!("Discarding superseded rings result #{}", generation);
                    return false;
                }
                match result {
                    Ok(rings) => self.rings.set(rings.unwrap_or_default()),
                    Err(e) => self.feed_failed(FeedSource::Activity, "rings", e),
                }
                true
            }
            FeedUpdate::Steps { generation, result } => {
                if !self.steps.finish(generation) {
                    log::debug!("Discarding superseded step result #{}", generation);
                    return false;
                }
                match result {
                    Ok(steps) => self.steps.set(steps.unwrap_or(0)),
                    Err(e) => self.feed_failed(FeedSource::Activity, "steps", e),
                }
                true
            }
            FeedUpdate::Temperature { generation, result } => {
                if !self.temperature.finish(generation) {
                    log::debug!("Discarding superseded weather result #{}", generation);
                    return false;
                }
                let reading = result.and_then(|celsius| {
                    Temperature::from_celsius(celsius)
                        .ok_or_else(|| TermfaceError::malformed("temperature is not a number"))
                });
                match reading {
                    Ok(temperature) => self.temperature.set(temperature),
                    Err(e) => self.feed_failed(FeedSource::Weather, "weather", e),
                }
                true
            }
        }
    }

    fn authorize(&mut self, source: FeedSource, permission: Permission) {
        let access = Access::from(permission);
        if access == Access::Denied {
            log::warn!("{} access denied; showing placeholder for this session", source);
        } else {
            log::info!("{} access granted", source);
        }
        self.set_access(source, access);
    }

    fn set_access(&mut self, source: FeedSource, access: Access) {
        match source {
            FeedSource::Activity => {
                self.rings.set_access(access);
                self.steps.set_access(access);
            }
            FeedSource::Weather => {
                self.temperature.set_access(access);
                if access == Access::Denied {
                    self.temperature.set(Temperature::Unavailable);
                }
            }
        }
    }

    fn feed_failed(&mut self, source: FeedSource, feed: &str, error: TermfaceError) {
        match error.kind() {
            ErrorKind::PermissionDenied => self.authorize(source, Permission::Denied),
            ErrorKind::Transient | ErrorKind::Malformed => {
                log::debug!("{} fetch failed, keeping last value: {}", feed, error);
            }
        }
    }
}
