//! Sensor Reading Wire Type
//!
//! The JSON shape the store serves from its latest/prev endpoints. All
//! measurement fields are optional on the wire; substitution of defaults
//! happens during sanitization, never here. The core never mutates a
//! reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored sensor reading, exactly as the store serves it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Reporting device identifier
    #[serde(default)]
    pub device_id: String,
    /// Controller that relayed the reading
    #[serde(default)]
    pub controller: String,
    /// Ambient temperature in degrees Celsius
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Gas concentration in ppm
    pub gas: Option<f64>,
    /// Panic button state
    #[serde(default)]
    pub button: bool,
    /// PIR motion sensor states, one entry per sensor
    pub motion: Option<Vec<bool>>,
    /// Door/contact sensor states, one entry per sensor
    pub cmk: Option<Vec<bool>>,
    /// Capture time assigned by the store
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    /// True when at least one motion sensor reads active.
    /// Absent or empty lists count as no motion.
    pub fn any_motion(&self) -> bool {
        self.motion
            .as_deref()
            .map_or(false, |m| m.iter().any(|&v| v))
    }

    /// True when at least one door/contact sensor reads open.
    /// Absent or empty lists count as closed.
    pub fn any_door(&self) -> bool {
        self.cmk.as_deref().map_or(false, |c| c.iter().any(|&v| v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_reading() {
        let json = r#"{
            "device_id": "esp32-07",
            "controller": "hub-a",
            "temperature": 24.5,
            "humidity": 61.0,
            "gas": 310.0,
            "button": false,
            "motion": [false, true],
            "cmk": [false],
            "timestamp": "2026-08-25T10:30:00.123456Z"
        }"#;

        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.device_id, "esp32-07");
        assert_eq!(reading.temperature, Some(24.5));
        assert!(!reading.button);
        assert!(reading.any_motion());
        assert!(!reading.any_door());
    }

    #[test]
    fn test_deserialize_sparse_reading() {
        // Only the timestamp is mandatory on the wire
        let json = r#"{"timestamp": "2026-08-25T10:30:00Z"}"#;

        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.device_id, "");
        assert_eq!(reading.temperature, None);
        assert!(!reading.button);
        assert_eq!(reading.motion, None);
    }

    #[test]
    fn test_deserialize_null_sensor_lists() {
        let json = r#"{
            "temperature": null,
            "motion": null,
            "cmk": null,
            "timestamp": "2026-08-25T10:30:00Z"
        }"#;

        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert!(!reading.any_motion());
        assert!(!reading.any_door());
    }

    #[test]
    fn test_any_motion_empty_list_is_false() {
        let json = r#"{"motion": [], "cmk": [], "timestamp": "2026-08-25T10:30:00Z"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert!(!reading.any_motion());
        assert!(!reading.any_door());
    }

    #[test]
    fn test_any_door_single_open_contact() {
        let json = r#"{"cmk": [false, false, true], "timestamp": "2026-08-25T10:30:00Z"}"#;
        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert!(reading.any_door());
    }
}
