//! Central Configuration Defaults
//!
//! Single source of truth for the agent's configuration fallbacks.
//! Every value here can be overridden through the HOMEWATCH_* environment
//! variables read in `config`.

/// Default sensor store base URL
///
/// This is the fallback URL when no environment variable is set.
/// The store exposes the latest/prev reading endpoints under /api/.
pub const DEFAULT_STORE_URL: &str = "http://localhost:8000";

/// Default telemetry sink base URL
pub const DEFAULT_SINK_URL: &str = "http://localhost:8080";

/// Default home identifier reported upstream
pub const DEFAULT_HOME_ID: i64 = 1;

/// Default device identifier reported upstream
pub const DEFAULT_DEVICE_ID: i64 = 1;

/// Default classifier artifact path
pub const DEFAULT_MODEL_PATH: &str = "models/emergency_forest.json";

/// Default reporting interval while the home is NORMAL (seconds)
pub const DEFAULT_NORMAL_INTERVAL: u64 = 10;

/// Default reporting interval at any elevated risk level (seconds)
pub const DEFAULT_RISK_INTERVAL: u64 = 1;

/// Default pause between polling cycles (seconds)
pub const DEFAULT_POLL_INTERVAL: u64 = 1;

/// Default HTTP timeout for store and sink requests (seconds)
pub const DEFAULT_HTTP_TIMEOUT: u64 = 10;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "HomeWatch";
