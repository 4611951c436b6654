use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::feeds::Coordinate;

pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";
pub const DEFAULT_SHELL_PREFIX: &str = "me@watch:";

/// Which activity provider feeds the rings and step count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivitySource {
    #[default]
    Simulated,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clock, battery and activity cadence
    pub fast_interval_ms: u64,
    /// Weather re-resolution cadence
    pub slow_interval_secs: u64,
    /// Cells in the battery bar (display only)
    pub battery_bar_width: usize,
    /// Upper bound for any single feed request
    pub request_timeout_secs: u64,
    pub weather_url: String,
    /// Fixed coordinate; when absent the location is looked up by IP
    pub location: Option<Coordinate>,
    pub geolocation_url: String,
    pub shell_prefix: String,
    pub activity: ActivitySource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fast_interval_ms: 1000,
            slow_interval_secs: 600,
            battery_bar_width: 7,
            request_timeout_secs: 10,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            location: None,
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            shell_prefix: DEFAULT_SHELL_PREFIX.to_string(),
            activity: ActivitySource::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing or empty files give the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("termface").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.fast_interval_ms == 0 {
            bail!("fast_interval_ms must be greater than zero");
        }
        if self.slow_interval_secs == 0 {
            bail!("slow_interval_secs must be greater than zero");
        }
        if self.battery_bar_width == 0 {
            bail!("battery_bar_width must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if let Some(coordinate) = &self.location {
            if !coordinate.is_valid() {
                bail!(
                    "location out of range: latitude {} longitude {}",
                    coordinate.latitude,
                    coordinate.longitude
                );
            }
        }
        Ok(())
    }

    pub fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.fast_interval_ms)
    }

    pub fn slow_interval(&self) -> Duration {
        Duration::from_secs(self.slow_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
