//! Telemetry
//!
//! Adaptive reporting: what to send (`payload`), when to send it
//! (`schedule`), and where it goes (`sink`).

pub mod payload;
pub mod schedule;
pub mod sink;

pub use payload::TelemetryReport;
pub use schedule::{ReportSchedule, TelemetryState};
pub use sink::{HttpTelemetrySink, ReportError, TelemetrySink};
