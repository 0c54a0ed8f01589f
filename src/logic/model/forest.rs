//! Decision Forest Inference
//!
//! Native evaluation of the trained random-forest artifact. Each tree is
//! a flat node array walked from index 0: a split compares one feature
//! against a threshold and follows `left` when `value <= threshold`.
//! Leaf class counts normalize to per-tree distributions which average
//! across the forest.

use serde::{Deserialize, Serialize};

use super::{EmergencyClassifier, ModelError, Prediction};
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};

/// Class label meaning "emergency" inside artifacts
pub const EMERGENCY_CLASS: u8 = 1;

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// On-disk forest artifact (JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Artifact format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Training feature order; must match `FEATURE_LAYOUT` when present
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Class labels in training order (0 = normal, 1 = emergency)
    pub classes: Vec<u8>,
    /// Individual estimators
    pub trees: Vec<Tree>,
}

fn default_version() -> u32 {
    1
}

/// One estimator as a flat node array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// One node of a flattened decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Interior split: `feature <= threshold` goes to `left`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node holding per-class training sample counts
    Leaf { counts: Vec<f64> },
}

// ============================================================================
// MODEL
// ============================================================================

/// Validated, ready-to-run forest
#[derive(Debug, Clone)]
pub struct ForestModel {
    classes: Vec<u8>,
    trees: Vec<Tree>,
}

impl ForestModel {
    /// Validate an artifact and build the runnable model
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, ModelError> {
        validate(&artifact)?;
        Ok(Self {
            classes: artifact.classes,
            trees: artifact.trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn classes(&self) -> &[u8] {
        &self.classes
    }

    /// Averaged per-class probability distribution across all trees
    fn class_distribution(&self, values: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        let mut sums = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let counts = walk(tree, values);
            let total: f64 = counts.iter().sum();
            for (sum, &count) in sums.iter_mut().zip(counts) {
                *sum += count / total;
            }
        }
        let trees = self.trees.len() as f64;
        for sum in &mut sums {
            *sum /= trees;
        }
        sums
    }
}

impl EmergencyClassifier for ForestModel {
    fn classify(&self, features: &FeatureVector) -> Prediction {
        let values = features.as_array();
        let distribution = self.class_distribution(&values);

        // A forest trained on one class only yields a single column; that
        // lone value is used as the emergency likelihood as-is instead of
        // failing on a missing positive column.
        if self.classes.len() == 1 {
            return Prediction {
                emergency: self.classes[0] == EMERGENCY_CLASS,
                probability: distribution[0],
            };
        }

        let probability = self
            .classes
            .iter()
            .position(|&c| c == EMERGENCY_CLASS)
            .map_or(0.0, |i| distribution[i]);

        let mut best = 0;
        for (i, p) in distribution.iter().enumerate() {
            if *p > distribution[best] {
                best = i;
            }
        }

        Prediction {
            emergency: self.classes[best] == EMERGENCY_CLASS,
            probability,
        }
    }
}

/// Follow one tree from the root to its matching leaf.
/// Validation guarantees forward-only child indices, so the walk always
/// terminates.
fn walk<'t>(tree: &'t Tree, values: &[f64; FEATURE_COUNT]) -> &'t [f64] {
    let mut index = 0;
    loop {
        match &tree.nodes[index] {
            Node::Leaf { counts } => return counts,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                index = if values[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
            }
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

fn validate(artifact: &ForestArtifact) -> Result<(), ModelError> {
    if !artifact.feature_names.is_empty() {
        let expected: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        if artifact.feature_names != expected {
            return Err(ModelError::LayoutMismatch {
                expected,
                found: artifact.feature_names.clone(),
            });
        }
    }

    if artifact.classes.is_empty() || artifact.classes.len() > 2 {
        return Err(ModelError::Invalid(format!(
            "expected one or two classes, found {}",
            artifact.classes.len()
        )));
    }
    if artifact.classes.iter().any(|&c| c > EMERGENCY_CLASS) {
        return Err(ModelError::Invalid(
            "class labels must be 0 or 1".to_string(),
        ));
    }
    if artifact.classes.len() == 2 && artifact.classes[0] >= artifact.classes[1] {
        return Err(ModelError::Invalid(
            "class labels must be strictly increasing".to_string(),
        ));
    }

    if artifact.trees.is_empty() {
        return Err(ModelError::Invalid("forest has no trees".to_string()));
    }

    for (t, tree) in artifact.trees.iter().enumerate() {
        if tree.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {} has no nodes", t)));
        }
        for (i, node) in tree.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {}: feature index {} out of range",
                            t, i, feature
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {}: non-finite threshold",
                            t, i
                        )));
                    }
                    // Children must point forward; this rules out cycles
                    // and bounds the walk by the node count.
                    if *left <= i
                        || *right <= i
                        || *left >= tree.nodes.len()
                        || *right >= tree.nodes.len()
                    {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {}: child indices must point forward within the tree",
                            t, i
                        )));
                    }
                }
                Node::Leaf { counts } => {
                    if counts.len() != artifact.classes.len() {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {}: expected {} class counts, found {}",
                            t,
                            i,
                            artifact.classes.len(),
                            counts.len()
                        )));
                    }
                    let total: f64 = counts.iter().sum();
                    if counts.iter().any(|c| !c.is_finite() || *c < 0.0) || total <= 0.0 {
                        return Err(ModelError::Invalid(format!(
                            "tree {} node {}: invalid class counts",
                            t, i
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}
