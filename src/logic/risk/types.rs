//! Risk Types
//!
//! Core types for risk assessment. No logic here, only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Home risk levels, ordered from calm to critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Everything stable, no action needed
    Normal,
    /// Sensor values slightly above comfort range, worth watching
    Low,
    /// The model sees an emergency but nothing confirms it yet
    Medium,
    /// Confirmed emergency or panic button, act now
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Normal => 0,
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    /// Anything above NORMAL reports on the fast cadence
    pub fn is_elevated(&self) -> bool {
        *self != RiskLevel::Normal
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ASSESSMENT RESULT
// ============================================================================

/// Result of one risk assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Which cascade rule fired, in plain words
    pub reason: &'static str,
}
