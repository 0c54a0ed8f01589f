//! Adaptive Report Schedule
//!
//! Risk-driven cadence: an elevated home reports fast, a calm home
//! slow. The poll period is independent of this; the schedule only
//! decides whether a given cycle's assessment goes upstream.

use std::time::{Duration, Instant};

use crate::constants;
use crate::logic::risk::RiskLevel;

// ============================================================================
// SCHEDULE
// ============================================================================

/// Send intervals per risk regime
#[derive(Debug, Clone, Copy)]
pub struct ReportSchedule {
    /// Interval while the home is NORMAL
    pub normal_interval: Duration,
    /// Interval at any elevated level
    pub risk_interval: Duration,
}

impl Default for ReportSchedule {
    fn default() -> Self {
        Self {
            normal_interval: Duration::from_secs(constants::DEFAULT_NORMAL_INTERVAL),
            risk_interval: Duration::from_secs(constants::DEFAULT_RISK_INTERVAL),
        }
    }
}

impl ReportSchedule {
    /// Interval in force for a risk level
    pub fn interval_for(&self, level: RiskLevel) -> Duration {
        if level.is_elevated() {
            self.risk_interval
        } else {
            self.normal_interval
        }
    }

    /// True when at least the level's interval has passed since the last
    /// send
    pub fn should_send(&self, now: Instant, last_send: Instant, level: RiskLevel) -> bool {
        now.saturating_duration_since(last_send) >= self.interval_for(level)
    }
}

// ============================================================================
// STATE
// ============================================================================

/// Cadence state carried across cycles. Owned by the monitor, never
/// shared.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryState {
    /// When the last report went out; `None` until the first send
    pub last_send: Option<Instant>,
    /// Risk level of the most recent assessed cycle
    pub current_level: RiskLevel,
}

impl TelemetryState {
    pub fn new() -> Self {
        Self {
            last_send: None,
            current_level: RiskLevel::Normal,
        }
    }

    /// A report is due when none was ever sent or when the interval for
    /// `level` has elapsed
    pub fn is_due(&self, now: Instant, schedule: &ReportSchedule, level: RiskLevel) -> bool {
        match self.last_send {
            None => true,
            Some(last_send) => schedule.should_send(now, last_send, level),
        }
    }

    /// Record a successful send
    pub fn mark_sent(&mut self, now: Instant) {
        self.last_send = Some(now);
    }
}

impl Default for TelemetryState {
    fn default() -> Self {
        Self::new()
    }
}
