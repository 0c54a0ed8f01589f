//! Feature Sanitization & Vector Assembly
//!
//! Converts a raw reading into the fixed four-feature layout the
//! classifier was trained on. Out-of-range or absent measurements are
//! replaced by a default value, never clamped to the nearest bound.

use super::reading::SensorReading;

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 4;

/// Feature order the classifier was trained on
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = ["temperature", "humidity", "gas", "button"];

/// Lowest plausible temperature (Celsius)
pub const TEMPERATURE_MIN: f64 = 0.0;
/// Highest plausible temperature (Celsius)
pub const TEMPERATURE_MAX: f64 = 100.0;
/// Lowest plausible relative humidity (percent)
pub const HUMIDITY_MIN: f64 = 0.0;
/// Highest plausible relative humidity (percent)
pub const HUMIDITY_MAX: f64 = 100.0;
/// Lowest plausible gas concentration (ppm)
pub const GAS_MIN: f64 = 0.0;
/// Highest plausible gas concentration (ppm)
pub const GAS_MAX: f64 = 5000.0;
/// Substitute for absent or implausible measurements
pub const SANITIZE_DEFAULT: f64 = 0.0;

/// Replace absent, non-finite or out-of-range values with `default`.
/// In-range values pass through unchanged; bounds are inclusive.
pub fn sanitize(value: Option<f64>, min: f64, max: f64, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= min && v <= max => v,
        _ => default,
    }
}

/// Sanitized classifier inputs for one cycle, in training order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub temperature: f64,
    pub humidity: f64,
    pub gas: f64,
    /// 1 when the panic button is pressed, 0 otherwise
    pub button: u8,
}

impl FeatureVector {
    /// Sanitize a raw reading into the training feature layout
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            temperature: sanitize(
                reading.temperature,
                TEMPERATURE_MIN,
                TEMPERATURE_MAX,
                SANITIZE_DEFAULT,
            ),
            humidity: sanitize(
                reading.humidity,
                HUMIDITY_MIN,
                HUMIDITY_MAX,
                SANITIZE_DEFAULT,
            ),
            gas: sanitize(reading.gas, GAS_MIN, GAS_MAX, SANITIZE_DEFAULT),
            button: u8::from(reading.button),
        }
    }

    /// Feature values in `FEATURE_LAYOUT` order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.temperature,
            self.humidity,
            self.gas,
            f64::from(self.button),
        ]
    }
}
