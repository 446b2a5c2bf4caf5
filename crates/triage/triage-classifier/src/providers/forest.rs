//! Random-forest classifier loaded from a JSON artifact.
//!
//! Each tree is stored as parallel node arrays: `children_left`,
//! `children_right`, `feature`, `threshold`, `value`. A node is a leaf when
//! its left child is `-1`. Prediction walks every tree (`x[feature] <=
//! threshold` goes left), normalises the leaf's class weights, and averages
//! the per-tree distributions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use triage_core::errors::{ClassifierError, TriageResult};
use triage_core::models::FeatureVector;
use triage_core::traits::IProbabilisticClassifier;

use crate::schema::SymptomSchema;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeModel {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub n_classes: usize,
    /// Checksum of the schema the model was trained against, if recorded.
    #[serde(default)]
    pub schema_checksum: Option<String>,
    pub trees: Vec<TreeModel>,
}

/// Immutable, validated forest. Safe for concurrent reads.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    model: ForestModel,
}

impl ForestClassifier {
    /// Validate a model in memory.
    pub fn from_model(model: ForestModel) -> Result<Self, ClassifierError> {
        validate_model(&model)?;
        Ok(Self { model })
    }

    /// Load and validate a JSON forest artifact.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let model: ForestModel = crate::read_json_artifact(path)?;
        Self::from_model(model).map_err(|e| match e {
            ClassifierError::ArtifactMismatch { details } => ClassifierError::ArtifactLoad {
                path: path.display().to_string(),
                reason: details,
            },
            other => other,
        })
    }

    /// Reject the model if it recorded a schema checksum that differs from `schema`.
    pub fn verify_schema(&self, schema: &SymptomSchema) -> Result<(), ClassifierError> {
        match &self.model.schema_checksum {
            Some(recorded) if *recorded != schema.checksum() => {
                Err(ClassifierError::ArtifactMismatch {
                    details: format!(
                        "model was trained against schema checksum {recorded}, loaded schema {} has {}",
                        schema.version(),
                        schema.checksum()
                    ),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn tree_count(&self) -> usize {
        self.model.trees.len()
    }

    /// Normalised class distribution at the leaf `x` falls into.
    fn tree_distribution(&self, tree: &TreeModel, x: &[u8]) -> Vec<f64> {
        let mut node = 0usize;
        while tree.children_left[node] != LEAF {
            let feature = tree.feature[node] as usize;
            let value = f64::from(x[feature]);
            node = if value <= tree.threshold[node] {
                tree.children_left[node] as usize
            } else {
                tree.children_right[node] as usize
            };
        }
        let weights = &tree.value[node];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![0.0; self.model.n_classes]
        }
    }
}

impl IProbabilisticClassifier for ForestClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> TriageResult<Vec<f64>> {
        if features.len() != self.model.n_features {
            return Err(ClassifierError::FeatureLengthMismatch {
                expected: self.model.n_features,
                actual: features.len(),
            }
            .into());
        }
        let x = features.as_slice();
        let mut acc = vec![0.0f64; self.model.n_classes];
        for tree in &self.model.trees {
            for (slot, p) in acc.iter_mut().zip(self.tree_distribution(tree, x)) {
                *slot += p;
            }
        }
        let n_trees = self.model.trees.len() as f64;
        Ok(acc.into_iter().map(|p| p / n_trees).collect())
    }

    fn n_features(&self) -> usize {
        self.model.n_features
    }

    fn n_classes(&self) -> usize {
        self.model.n_classes
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}

/// Structural checks that make tree walking total: every internal node points
/// at strictly later children, so traversal always terminates at a leaf.
fn validate_model(model: &ForestModel) -> Result<(), ClassifierError> {
    let mismatch = |details: String| ClassifierError::ArtifactMismatch { details };

    if model.n_features == 0 || model.n_classes == 0 {
        return Err(mismatch("model declares zero features or classes".to_string()));
    }
    if model.trees.is_empty() {
        return Err(mismatch("forest has no trees".to_string()));
    }

    for (t, tree) in model.trees.iter().enumerate() {
        let n = tree.children_left.len();
        if n == 0
            || tree.children_right.len() != n
            || tree.feature.len() != n
            || tree.threshold.len() != n
            || tree.value.len() != n
        {
            return Err(mismatch(format!("tree {t}: node arrays have inconsistent lengths")));
        }
        for node in 0..n {
            let left = tree.children_left[node];
            let right = tree.children_right[node];
            if left == LEAF {
                if tree.value[node].len() != model.n_classes {
                    return Err(mismatch(format!(
                        "tree {t} leaf {node}: expected {} class weights, found {}",
                        model.n_classes,
                        tree.value[node].len()
                    )));
                }
                continue;
            }
            let in_range = |c: i64| c > node as i64 && (c as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(mismatch(format!("tree {t} node {node}: child index out of range")));
            }
            let feature = tree.feature[node];
            if feature < 0 || feature as usize >= model.n_features {
                return Err(mismatch(format!(
                    "tree {t} node {node}: feature index {feature} out of range"
                )));
            }
        }
    }
    Ok(())
}
