//! Telemetry Sink Client
//!
//! Pushes assembled reports to the upstream home-status service. A
//! failed send is logged by the caller and retried on the next due
//! cycle, never within the same one.

use std::time::Duration;

use thiserror::Error;

use super::payload::TelemetryReport;

/// Sink endpoint accepting reports
const REPORT_PATH: &str = "sensor-data";

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure while delivering a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("sink request failed: {0}")]
    Network(String),
    #[error("sink returned status {0}")]
    Status(u16),
}

// ============================================================================
// SINK TRAIT
// ============================================================================

/// Where reports go (HTTP sink in production, recording fakes in tests)
pub trait TelemetrySink {
    async fn report(&self, report: &TelemetryReport) -> Result<(), ReportError>;
}

// ============================================================================
// HTTP IMPLEMENTATION
// ============================================================================

/// Upstream report client
pub struct HttpTelemetrySink {
    url: String,
    http_client: reqwest::Client,
}

impl HttpTelemetrySink {
    /// Create a sink client with an explicit request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: format!("{}/{}", base_url.trim_end_matches('/'), REPORT_PATH),
            http_client,
        })
    }
}

impl TelemetrySink for HttpTelemetrySink {
    async fn report(&self, report: &TelemetryReport) -> Result<(), ReportError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(report)
            .send()
            .await
            .map_err(|e| ReportError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ReportError::Status(response.status().as_u16()))
        }
    }
}
