//! Risk Engine
//!
//! The ordered decision cascade from one cycle's prediction and reading
//! to a risk level. First matching rule wins; later rules never soften
//! an earlier match. Deterministic: same inputs, same output.

use super::rules::RiskThresholds;
use super::types::{RiskAssessment, RiskLevel};
use crate::logic::model::Prediction;
use crate::logic::reading::SensorReading;

// ============================================================================
// MAIN ASSESSMENT FUNCTION
// ============================================================================

/// Assess one cycle with the default thresholds
pub fn assess(prediction: &Prediction, reading: &SensorReading) -> RiskAssessment {
    assess_with_thresholds(prediction, reading, &RiskThresholds::default())
}

/// Assessment with custom thresholds
pub fn assess_with_thresholds(
    prediction: &Prediction,
    reading: &SensorReading,
    thresholds: &RiskThresholds,
) -> RiskAssessment {
    // 1. Panic button overrides everything, even a negative prediction.
    if reading.button {
        return RiskAssessment {
            level: RiskLevel::High,
            reason: "panic button pressed",
        };
    }

    // 2. Confident positive prediction backed by motion or door activity.
    if prediction.emergency
        && prediction.probability > thresholds.confirm_probability
        && (reading.any_motion() || reading.any_door())
    {
        return RiskAssessment {
            level: RiskLevel::High,
            reason: "confirmed by context sensors",
        };
    }

    // 3. Positive prediction without confirmation. A confident prediction
    //    with no context support lands here as well.
    if prediction.emergency && prediction.probability > thresholds.trigger_probability {
        return RiskAssessment {
            level: RiskLevel::Medium,
            reason: "ML triggered without confirmation",
        };
    }

    // 4. Raw values, not sanitized features: a reading far outside the
    //    plausible range still counts as elevated here. Absent values
    //    never do.
    let temperature_elevated = reading
        .temperature
        .map_or(false, |t| t > thresholds.elevated_temperature);
    let gas_elevated = reading.gas.map_or(false, |g| g > thresholds.elevated_gas);
    if temperature_elevated || gas_elevated {
        return RiskAssessment {
            level: RiskLevel::Low,
            reason: "slightly elevated sensor values",
        };
    }

    // 5. Nothing fired.
    RiskAssessment {
        level: RiskLevel::Normal,
        reason: "all conditions stable",
    }
}

// ============================================================================
// TESTS
// ============================================================================
