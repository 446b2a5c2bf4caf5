//! # triage-classifier
//!
//! Everything between a symptom set and a ranked list of condition labels.
//!
//! ## Architecture
//!
//! ```text
//! ArtifactBundle (loaded once, validated together, fatal on mismatch)
//! ├── SymptomSchema   (ordered identifiers, versioned, BLAKE3 checksum)
//! ├── LabelIndex      (label ↔ class index)
//! └── classifier      (ForestClassifier | OnnxClassifier behind `onnx`)
//!
//! FeatureEncoder ──▶ FeatureVector ──▶ predict_proba ──▶ Ranker (top-K)
//! ```

pub mod artifacts;
pub mod encoder;
pub mod labels;
pub mod providers;
pub mod ranker;
pub mod schema;

pub use artifacts::ArtifactBundle;
pub use encoder::{parse_symptom_list, FeatureEncoder};
pub use labels::LabelIndex;
pub use providers::ForestClassifier;
pub use ranker::{round_confidence, Ranker};
pub use schema::SymptomSchema;

use std::path::Path;

use triage_core::errors::ClassifierError;

/// Read a JSON artifact, mapping every failure onto `ArtifactLoad`.
pub(crate) fn read_json_artifact<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<T, ClassifierError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ClassifierError::ArtifactLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ClassifierError::ArtifactLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
