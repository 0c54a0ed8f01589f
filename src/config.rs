//! Agent Configuration
//!
//! Every setting comes from a HOMEWATCH_* environment variable with the
//! fallbacks defined in `constants`. Loading never fails: missing or
//! unparsable values fall back to their defaults.

use std::time::Duration;

use crate::constants;

/// Runtime configuration for the monitoring agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the sensor reading store
    pub store_url: String,
    /// Base URL of the telemetry sink
    pub sink_url: String,
    /// Home identifier included in every report
    pub home_id: i64,
    /// Device identifier included in every report
    pub device_id: i64,
    /// Path to the classifier artifact
    pub model_path: String,
    /// Expected SHA-256 digest of the artifact (hex); verified when set
    pub model_sha256: Option<String>,
    /// Reporting interval while the home is NORMAL
    pub normal_interval: Duration,
    /// Reporting interval at any elevated risk level
    pub risk_interval: Duration,
    /// Pause between polling cycles
    pub poll_interval: Duration,
    /// Timeout applied to every store and sink request
    pub http_timeout: Duration,
    /// Master switch for the reporting sink
    pub reporting_enabled: bool,
}

impl AgentConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        Self {
            store_url: env_string("HOMEWATCH_STORE_URL", constants::DEFAULT_STORE_URL),
            sink_url: env_string("HOMEWATCH_SINK_URL", constants::DEFAULT_SINK_URL),
            home_id: env_i64("HOMEWATCH_HOME_ID", constants::DEFAULT_HOME_ID),
            device_id: env_i64("HOMEWATCH_DEVICE_ID", constants::DEFAULT_DEVICE_ID),
            model_path: env_string("HOMEWATCH_MODEL_PATH", constants::DEFAULT_MODEL_PATH),
            model_sha256: std::env::var("HOMEWATCH_MODEL_SHA256")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            normal_interval: Duration::from_secs(env_u64(
                "HOMEWATCH_NORMAL_INTERVAL_SECS",
                constants::DEFAULT_NORMAL_INTERVAL,
            )),
            risk_interval: Duration::from_secs(env_u64(
                "HOMEWATCH_RISK_INTERVAL_SECS",
                constants::DEFAULT_RISK_INTERVAL,
            )),
            poll_interval: Duration::from_secs(env_u64(
                "HOMEWATCH_POLL_INTERVAL_SECS",
                constants::DEFAULT_POLL_INTERVAL,
            )),
            http_timeout: Duration::from_secs(env_u64(
                "HOMEWATCH_HTTP_TIMEOUT_SECS",
                constants::DEFAULT_HTTP_TIMEOUT,
            )),
            reporting_enabled: env_bool("HOMEWATCH_REPORTING_ENABLED", true),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(default)
}
