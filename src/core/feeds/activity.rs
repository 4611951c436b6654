use async_trait::async_trait;
use chrono::{DateTime, Local, Timelike};
use std::sync::Arc;

use super::{ActivityFeed, ClockSource, Permission};
use crate::core::display::ActivityRings;
use crate::error::{Result, TermfaceError};

/// Minutes after midnight before the first summary of the day exists
const NO_DATA_MINUTES: u32 = 5;
/// Activity is accrued between 07:00 and 22:00
const DAY_START_MINUTES: u32 = 7 * 60;
const DAY_END_MINUTES: u32 = 22 * 60;

const STEPS_PER_ACTIVE_MINUTE: u64 = 9;
const MAX_EXERCISE_MINUTES: u32 = 30;
const MAX_STAND_COUNT: u32 = 12;

/// Plausible daily totals derived from the time of day.
///
/// Every call recomputes the window from local midnight through the current
/// clock reading, so values only grow during a day and reset after midnight.
#[derive(Clone)]
pub struct SimulatedActivity {
    clock: Arc<dyn ClockSource>,
}

impl SimulatedActivity {
    pub fn new(clock: Arc<dyn ClockSource>) -> Self {
        Self { clock }
    }

    fn active_minutes(now: &DateTime<Local>) -> Option<u32> {
        let since_midnight = now.hour() * 60 + now.minute();
        if since_midnight < NO_DATA_MINUTES {
            return None;
        }

        let active = since_midnight
            .min(DAY_END_MINUTES)
            .saturating_sub(DAY_START_MINUTES);
        Some(active)
    }

    pub fn rings_at(now: &DateTime<Local>) -> Option<ActivityRings> {
        let active = Self::active_minutes(now)?;
        let steps = Self::steps_for(active);

        Some(ActivityRings {
            move_kcal: (steps / 20) as u32 + active / 4,
            exercise_minutes: (active / 30).min(MAX_EXERCISE_MINUTES),
            stand_count: (active / 60).min(MAX_STAND_COUNT),
        })
    }

    pub fn steps_at(now: &DateTime<Local>) -> Option<u64> {
        Self::active_minutes(now).map(Self::steps_for)
    }

    fn steps_for(active_minutes: u32) -> u64 {
        let active = active_minutes as u64;
        active * STEPS_PER_ACTIVE_MINUTE + active / 7
    }
}

#[async_trait]
impl ActivityFeed for SimulatedActivity {
    async fn authorize(&self) -> Result<Permission> {
        Ok(Permission::Granted)
    }

    async fn fetch_daily_rings(&self) -> Result<Option<ActivityRings>> {
        Ok(Self::rings_at(&self.clock.now()))
    }

    async fn fetch_step_count(&self) -> Result<Option<u64>> {
        Ok(Self::steps_at(&self.clock.now()))
    }
}

/// Provider for hosts where activity data is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledActivity;

#[async_trait]
impl ActivityFeed for DisabledActivity {
    async fn authorize(&self) -> Result<Permission> {
        Ok(Permission::Denied)
    }

    async fn fetch_daily_rings(&self) -> Result<Option<ActivityRings>> {
        Err(TermfaceError::permission_denied("activity data is disabled"))
    }

    async fn fetch_step_count(&self) -> Result<Option<u64>> {
        Err(TermfaceError::permission_denied("activity data is disabled"))
    }
}
