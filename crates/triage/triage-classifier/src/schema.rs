//! Symptom schema: the ordered identifiers that give each feature position its
//! meaning. Must match the model's training-time column order exactly.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use triage_core::constants::{DEFAULT_SCHEMA_VERSION, DEFAULT_SYMPTOM_SCHEMA};
use triage_core::errors::ClassifierError;

/// On-disk schema artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaArtifact {
    pub version: String,
    pub symptoms: Vec<String>,
}

/// Ordered, unique symptom identifiers with O(1) position lookup.
#[derive(Debug, Clone)]
pub struct SymptomSchema {
    version: String,
    symptoms: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SymptomSchema {
    /// Build a schema, rejecting empty or duplicated identifier lists.
    pub fn new(version: impl Into<String>, symptoms: Vec<String>) -> Result<Self, ClassifierError> {
        if symptoms.is_empty() {
            return Err(ClassifierError::ArtifactMismatch {
                details: "symptom schema is empty".to_string(),
            });
        }
        let mut positions = HashMap::with_capacity(symptoms.len());
        for (i, s) in symptoms.iter().enumerate() {
            if positions.insert(s.clone(), i).is_some() {
                return Err(ClassifierError::ArtifactMismatch {
                    details: format!("duplicate symptom identifier in schema: {s:?}"),
                });
            }
        }
        Ok(Self {
            version: version.into(),
            symptoms,
            positions,
        })
    }

    /// The pinned training-time schema shipped with the crate.
    pub fn builtin() -> Self {
        let symptoms: Vec<String> = DEFAULT_SYMPTOM_SCHEMA.iter().map(|s| s.to_string()).collect();
        let positions = symptoms
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self {
            version: DEFAULT_SCHEMA_VERSION.to_string(),
            symptoms,
            positions,
        }
    }

    /// Load a schema artifact from JSON.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let artifact: SchemaArtifact = crate::read_json_artifact(path)?;
        Self::new(artifact.version, artifact.symptoms)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Position of an identifier (exact, case-sensitive match).
    pub fn position(&self, symptom: &str) -> Option<usize> {
        self.positions.get(symptom).copied()
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.positions.contains_key(symptom)
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// BLAKE3 hex digest over the newline-joined identifiers.
    ///
    /// Model artifacts record this value so a reordered or edited schema is
    /// caught at startup instead of silently corrupting predictions.
    pub fn checksum(&self) -> String {
        blake3::hash(self.symptoms.join("\n").as_bytes())
            .to_hex()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_training_order() {
        let schema = SymptomSchema::builtin();
        assert_eq!(schema.len(), 132);
        assert_eq!(schema.position("itching"), Some(0));
        assert_eq!(schema.position("skin_rash"), Some(1));
        assert_eq!(schema.position("yellow_crust_ooze"), Some(131));
        assert_eq!(schema.version(), "v1");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let schema = SymptomSchema::builtin();
        assert!(schema.contains("itching"));
        assert!(!schema.contains("Itching"));
    }

    #[test]
    fn rejects_duplicates() {
        let err = SymptomSchema::new("t", vec!["a".into(), "b".into(), "a".into()]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_empty() {
        assert!(SymptomSchema::new("t", vec![]).is_err());
    }

    #[test]
    fn checksum_depends_on_order() {
        let ab = SymptomSchema::new("t", vec!["a".into(), "b".into()]).unwrap();
        let ba = SymptomSchema::new("t", vec!["b".into(), "a".into()]).unwrap();
        assert_ne!(ab.checksum(), ba.checksum());
        assert_eq!(ab.checksum(), ab.clone().checksum());
    }
}
