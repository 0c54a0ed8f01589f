//! Risk Assessment
//!
//! Turns one cycle's prediction and reading into a home risk level.
//! `types` holds the data structures, `rules` the thresholds, `engine`
//! the decision cascade.

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{assess, assess_with_thresholds};
pub use rules::RiskThresholds;
pub use types::{RiskAssessment, RiskLevel};
