//! Bidirectional label ↔ class-index mapping, produced by the same training
//! run as the model artifact.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use triage_core::errors::ClassifierError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelArtifact {
    pub labels: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LabelIndex {
    labels: Vec<String>,
    indices: HashMap<String, usize>,
}

impl LabelIndex {
    /// Build from labels in class-index order. Labels must be unique and non-empty.
    pub fn new(labels: Vec<String>) -> Result<Self, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::ArtifactMismatch {
                details: "label mapping is empty".to_string(),
            });
        }
        let mut indices = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if indices.insert(label.clone(), i).is_some() {
                return Err(ClassifierError::ArtifactMismatch {
                    details: format!("duplicate class label: {label:?}"),
                });
            }
        }
        Ok(Self { labels, indices })
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let artifact: LabelArtifact = crate::read_json_artifact(path)?;
        Self::new(artifact.labels)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_directions() {
        let idx = LabelIndex::new(vec!["Acne".into(), "Malaria".into()]).unwrap();
        assert_eq!(idx.label(1), Some("Malaria"));
        assert_eq!(idx.index_of("Acne"), Some(0));
        assert_eq!(idx.label(2), None);
        assert_eq!(idx.index_of("acne"), None);
    }

    #[test]
    fn rejects_duplicate_labels() {
        assert!(LabelIndex::new(vec!["A".into(), "A".into()]).is_err());
    }
}
