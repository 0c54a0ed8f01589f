//! Risk Rules & Thresholds
//!
//! Thresholds for the risk cascade. No decision logic here, only
//! constants and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS (constants, fixed at runtime)
// ============================================================================

/// Above this probability a positive prediction counts as confident
/// enough to be confirmed by context sensors
pub const CONFIRM_PROBABILITY: f64 = 0.8;

/// Above this probability a positive prediction raises risk at all
pub const TRIGGER_PROBABILITY: f64 = 0.6;

/// Raw temperature considered slightly elevated (Celsius)
pub const ELEVATED_TEMPERATURE: f64 = 45.0;

/// Raw gas concentration considered slightly elevated (ppm)
pub const ELEVATED_GAS: f64 = 900.0;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for tuning and tests)
// ============================================================================

/// Thresholds for risk assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Probability gate for the confirmed-HIGH rule
    pub confirm_probability: f64,
    /// Probability gate for the unconfirmed-MEDIUM rule
    pub trigger_probability: f64,
    /// Raw temperature gate for the LOW rule (Celsius)
    pub elevated_temperature: f64,
    /// Raw gas gate for the LOW rule (ppm)
    pub elevated_gas: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            confirm_probability: CONFIRM_PROBABILITY,
            trigger_probability: TRIGGER_PROBABILITY,
            elevated_temperature: ELEVATED_TEMPERATURE,
            elevated_gas: ELEVATED_GAS,
        }
    }
}
