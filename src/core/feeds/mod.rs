//! Data sources behind the face.
//!
//! Clock and battery are synchronous reads sampled on every fast tick.
//! Activity and weather are asynchronous and may complete at any time
//! relative to the ticks; the refresh loop owns what they return.

mod activity;
mod battery;
mod clock;
mod weather;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::config::{ActivitySource, Config};
use crate::core::display::ActivityRings;
use crate::error::Result;

pub use activity::{DisabledActivity, SimulatedActivity};
pub use self::battery::SystemBattery;
pub use clock::SystemClock;
pub use weather::{weather_request_url, Locator, OpenMeteoWeather};

/// Outcome of a one-time authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

pub trait ClockSource: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Battery charge in [0, 1]. Unknown maps to 0.
pub trait BatteryGauge: Send + Sync {
    fn fraction(&self) -> f64;
}

/// Today's activity, from local midnight through now.
#[async_trait]
pub trait ActivityFeed: Send + Sync {
    async fn authorize(&self) -> Result<Permission>;

    /// `None` means the provider has nothing for today yet.
    async fn fetch_daily_rings(&self) -> Result<Option<ActivityRings>>;

    /// `None` means no samples today.
    async fn fetch_step_count(&self) -> Result<Option<u64>>;
}

#[async_trait]
pub trait WeatherFeed: Send + Sync {
    async fn authorize(&self) -> Result<Permission>;

    /// One-shot: resolves with the first fix and stops listening.
    async fn resolve_location(&self) -> Result<Coordinate>;

    /// Current outdoor temperature in degrees Celsius.
    async fn fetch_temperature(&self, location: Coordinate) -> Result<f64>;
}

/// Everything the refresh loop reads from.
#[derive(Clone)]
pub struct Feeds {
    pub clock: Arc<dyn ClockSource>,
    pub battery: Arc<dyn BatteryGauge>,
    pub activity: Arc<dyn ActivityFeed>,
    pub weather: Arc<dyn WeatherFeed>,
}

impl Feeds {
    pub fn new(
        clock: Arc<dyn ClockSource>,
        battery: Arc<dyn BatteryGauge>,
        activity: Arc<dyn ActivityFeed>,
        weather: Arc<dyn WeatherFeed>,
    ) -> Self {
        Self {
            clock,
            battery,
            activity,
            weather,
        }
    }

    /// Host feeds as selected by the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);

        let activity: Arc<dyn ActivityFeed> = match config.activity {
            ActivitySource::Simulated => Arc::new(SimulatedActivity::new(Arc::clone(&clock))),
            ActivitySource::Disabled => Arc::new(DisabledActivity),
        };

        let locator = match config.location {
            Some(coordinate) => Locator::Fixed(coordinate),
            None => Locator::IpLookup(config.geolocation_url.clone()),
        };
        let weather = OpenMeteoWeather::new(
            config.weather_url.clone(),
            locator,
            config.request_timeout(),
        )?;

        Ok(Self::new(
            clock,
            Arc::new(SystemBattery),
            activity,
            Arc::new(weather),
        ))
    }
}
