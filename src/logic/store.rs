//! Sensor Store Client
//!
//! HTTP client for the reading store. The store keeps the two most
//! recent readings reachable: the current one and the one before it.
//! An empty response body (or 204) means the store has nothing yet.

use std::time::Duration;

use thiserror::Error;

use super::reading::SensorReading;

/// Store endpoint serving the current reading
const LATEST_PATH: &str = "api/latest-sensor/";
/// Store endpoint serving the reading before the current one
const PREVIOUS_PATH: &str = "api/prev-sensor/";

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure while querying the store. Always recovered: the cycle is
/// skipped and the loop polls again.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("store request failed: {0}")]
    Network(String),
    #[error("store returned status {0}")]
    Status(u16),
    #[error("store response did not parse: {0}")]
    Parse(String),
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// Where readings come from (HTTP store in production, scripted fakes
/// in tests)
pub trait SensorSource {
    async fn fetch_latest(&self) -> Result<Option<SensorReading>, FetchError>;
    async fn fetch_previous(&self) -> Result<Option<SensorReading>, FetchError>;
}

// ============================================================================
// HTTP IMPLEMENTATION
// ============================================================================

/// Reading store client
pub struct HttpSensorStore {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSensorStore {
    /// Create a store client with an explicit request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    async fn fetch(&self, path: &str) -> Result<Option<SensorReading>, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_body(&body)
    }
}

impl SensorSource for HttpSensorStore {
    async fn fetch_latest(&self) -> Result<Option<SensorReading>, FetchError> {
        self.fetch(LATEST_PATH).await
    }

    async fn fetch_previous(&self) -> Result<Option<SensorReading>, FetchError> {
        self.fetch(PREVIOUS_PATH).await
    }
}

/// An empty body is a valid "nothing stored yet" answer, anything else
/// must parse as a reading
fn parse_body(body: &str) -> Result<Option<SensorReading>, FetchError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| FetchError::Parse(e.to_string()))
}
