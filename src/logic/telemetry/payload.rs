//! Telemetry Report Payload
//!
//! The JSON shape the sink expects. Sensor channels are numbered string
//! keys on the wire: 1-3 carry the sanitized measurements, 4-6 the 0/1
//! context flags.

use serde::Serialize;

use crate::logic::features::FeatureVector;
use crate::logic::reading::SensorReading;
use crate::logic::risk::RiskLevel;

/// One upstream report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryReport {
    pub home_id: i64,
    pub device_id: i64,
    pub sensors: SensorChannels,
    pub home: HomeStatus,
}

/// Numbered sensor channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorChannels {
    #[serde(rename = "1")]
    pub temperature: f64,
    #[serde(rename = "2")]
    pub humidity: f64,
    #[serde(rename = "3")]
    pub gas: f64,
    #[serde(rename = "4")]
    pub motion: u8,
    #[serde(rename = "5")]
    pub door: u8,
    #[serde(rename = "6")]
    pub button: u8,
}

/// Overall home state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HomeStatus {
    pub status: &'static str,
}

impl TelemetryReport {
    /// Assemble the upstream payload for one assessed cycle
    pub fn new(
        home_id: i64,
        device_id: i64,
        features: &FeatureVector,
        reading: &SensorReading,
        level: RiskLevel,
    ) -> Self {
        Self {
            home_id,
            device_id,
            sensors: SensorChannels {
                temperature: features.temperature,
                humidity: features.humidity,
                gas: features.gas,
                motion: u8::from(reading.any_motion()),
                door: u8::from(reading.any_door()),
                button: u8::from(reading.button),
            },
            home: HomeStatus {
                status: level.as_str(),
            },
        }
    }
}
