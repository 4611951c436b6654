use chrono::{DateTime, Local};

use super::ClockSource;

/// Wall clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
