use battery::units::ratio::ratio;

use super::BatteryGauge;
use crate::core::display::format::clamp_fraction;
use crate::error::{Result, TermfaceError};

/// Host battery via the platform power-supply APIs.
///
/// Desktops without a battery and platforms the `battery` crate cannot read
/// both report an empty gauge.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBattery;

impl SystemBattery {
    /// State of charge of the first battery the OS reports.
    pub fn collect() -> Result<f64> {
        let manager = battery::Manager::new()
            .map_err(|e| TermfaceError::battery(format!("Failed to open power manager: {}", e)))?;

        let mut batteries = manager
            .batteries()
            .map_err(|e| TermfaceError::battery(format!("Failed to list batteries: {}", e)))?;

        let first = batteries
            .next()
            .ok_or_else(|| TermfaceError::battery("No battery present"))?
            .map_err(|e| TermfaceError::battery(format!("Failed to read battery: {}", e)))?;

        Ok(first.state_of_charge().get::<ratio>() as f64)
    }
}

impl BatteryGauge for SystemBattery {
    fn fraction(&self) -> f64 {
        match Self::collect() {
            Ok(fraction) => clamp_fraction(fraction),
            Err(e) => {
                log::trace!("Battery unreadable: {}", e);
                0.0
            }
        }
    }
}
