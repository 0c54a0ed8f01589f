//! Logic Module - Detection Pipeline & Engines
//!
//! One polling cycle flows through these modules in order:
//! store -> noise -> features -> model -> risk -> telemetry,
//! orchestrated by `monitor`.

// Pipeline stages
pub mod reading;
pub mod noise;
pub mod features;
pub mod model;
pub mod risk;

// I/O edges
pub mod store;
pub mod telemetry;

// Orchestration
pub mod monitor;
