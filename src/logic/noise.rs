//! Rate-of-Change Noise Filter
//!
//! Drops readings whose jump from the previous stored reading is too large
//! to be physical (sensor glitch, transmission corruption). A rejected
//! reading abandons the whole cycle: nothing is classified, assessed or
//! reported from it.

use super::reading::SensorReading;

/// Largest plausible temperature jump between consecutive readings (Celsius)
pub const MAX_TEMPERATURE_DELTA: f64 = 20.0;
/// Largest plausible gas jump between consecutive readings (ppm)
pub const MAX_GAS_DELTA: f64 = 500.0;

/// Why the latest reading was dropped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseRejection {
    TemperatureJump { delta: f64 },
    GasJump { delta: f64 },
}

/// Spike detector comparing consecutive readings
#[derive(Debug, Clone, Copy)]
pub struct RateOfChangeFilter {
    pub max_temperature_delta: f64,
    pub max_gas_delta: f64,
}

impl Default for RateOfChangeFilter {
    fn default() -> Self {
        Self {
            max_temperature_delta: MAX_TEMPERATURE_DELTA,
            max_gas_delta: MAX_GAS_DELTA,
        }
    }
}

impl RateOfChangeFilter {
    /// Reason the latest reading should be dropped, if any.
    ///
    /// Temperature is checked before gas, so a reading failing both limits
    /// reports the temperature jump. Without a previous reading everything
    /// is accepted. Absent measurements count as zero in the delta.
    pub fn rejection(
        &self,
        latest: &SensorReading,
        previous: Option<&SensorReading>,
    ) -> Option<NoiseRejection> {
        let previous = previous?;

        let temp_delta =
            (value_or_zero(latest.temperature) - value_or_zero(previous.temperature)).abs();
        if temp_delta > self.max_temperature_delta {
            return Some(NoiseRejection::TemperatureJump { delta: temp_delta });
        }

        let gas_delta = (value_or_zero(latest.gas) - value_or_zero(previous.gas)).abs();
        if gas_delta > self.max_gas_delta {
            return Some(NoiseRejection::GasJump { delta: gas_delta });
        }

        None
    }

    /// Check a reading and log the rejection reason when it is dropped
    pub fn accepts(&self, latest: &SensorReading, previous: Option<&SensorReading>) -> bool {
        match self.rejection(latest, previous) {
            None => true,
            Some(NoiseRejection::TemperatureJump { delta }) => {
                log::warn!(
                    "large temperature change between readings ({:.1} C), dropping cycle",
                    delta
                );
                false
            }
            Some(NoiseRejection::GasJump { delta }) => {
                log::warn!(
                    "large gas change between readings ({:.0} ppm), dropping cycle",
                    delta
                );
                false
            }
        }
    }
}

fn value_or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}
