//! Emergency Classifier
//!
//! Loads and runs the trained emergency model. The trait keeps the
//! pipeline independent of the artifact format so the engine can be
//! swapped without touching the cycle.

pub mod forest;
mod loader;

pub use forest::ForestModel;
pub use loader::load;

use thiserror::Error;

use super::features::FeatureVector;

// ============================================================================
// PREDICTION OUTPUT
// ============================================================================

/// Classifier output for one feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// True when the model labels the situation an emergency
    pub emergency: bool,
    /// Estimated probability of the emergency class, in [0, 1]
    pub probability: f64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure while loading or validating the model artifact.
/// Every variant is fatal at startup; the polling loop never runs
/// without a usable model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(String),
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("model checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },
    #[error("model feature layout mismatch: expected {expected:?}, found {found:?}")]
    LayoutMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Inference seam for the pipeline (decision forest, future engines,
/// test stubs)
pub trait EmergencyClassifier {
    fn classify(&self, features: &FeatureVector) -> Prediction;
}
