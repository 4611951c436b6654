use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{Coordinate, Permission, WeatherFeed};
use crate::error::{Result, TermfaceError};

const USER_AGENT: &str = concat!("termface/", env!("CARGO_PKG_VERSION"));

/// Where the weather lookup takes its coordinate from.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    /// Configured by the user; never changes
    Fixed(Coordinate),
    /// Approximate position from an IP geolocation endpoint
    IpLookup(String),
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Current temperature from the Open-Meteo forecast API.
pub struct OpenMeteoWeather {
    client: reqwest::Client,
    base_url: String,
    locator: Locator,
}

impl OpenMeteoWeather {
    pub fn new(base_url: impl Into<String>, locator: Locator, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            locator,
        })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TermfaceError::malformed(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// `<base>?latitude=..&longitude=..&current_weather=true&temperature_unit=celsius`
pub fn weather_request_url(base_url: &str, location: Coordinate) -> String {
    format!(
        "{}?latitude={}&longitude={}&current_weather=true&temperature_unit=celsius",
        base_url, location.latitude, location.longitude
    )
}

pub(crate) fn parse_forecast(body: &[u8]) -> Result<f64> {
    let forecast: ForecastResponse = serde_json::from_slice(body)?;

    forecast
        .current_weather
        .and_then(|current| current.temperature)
        .filter(|t| t.is_finite())
        .ok_or_else(|| TermfaceError::malformed("missing current_weather.temperature"))
}

pub(crate) fn parse_ip_location(body: &[u8]) -> Result<Coordinate> {
    let response: IpLocationResponse = serde_json::from_slice(body)?;

    if let Some(status) = response.status.as_deref() {
        if status != "success" {
            return Err(TermfaceError::location(
                response
                    .message
                    .unwrap_or_else(|| format!("lookup status {}", status)),
            ));
        }
    }

    match (response.lat, response.lon) {
        (Some(latitude), Some(longitude)) => {
            let coordinate = Coordinate {
                latitude,
                longitude,
            };
            if coordinate.is_valid() {
                Ok(coordinate)
            } else {
                Err(TermfaceError::malformed("coordinate out of range"))
            }
        }
        _ => Err(TermfaceError::malformed("missing lat/lon in location response")),
    }
}

#[async_trait]
impl WeatherFeed for OpenMeteoWeather {
    async fn authorize(&self) -> Result<Permission> {
        // Desktop hosts have no location prompt; network access is implicit.
        Ok(Permission::Granted)
    }

    async fn resolve_location(&self) -> Result<Coordinate> {
        match &self.locator {
            Locator::Fixed(coordinate) => Ok(*coordinate),
            Locator::IpLookup(url) => {
                let body = self.get_bytes(url).await?;
                let coordinate = parse_ip_location(&body)?;
                log::debug!(
                    "Location resolved to {:.2},{:.2}",
                    coordinate.latitude,
                    coordinate.longitude
                );
                Ok(coordinate)
            }
        }
    }

    async fn fetch_temperature(&self, location: Coordinate) -> Result<f64> {
        let url = weather_request_url(&self.base_url, location);
        let body = self.get_bytes(&url).await?;
        parse_forecast(&body)
    }
}
