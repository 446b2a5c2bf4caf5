use serde::{Deserialize, Serialize};

use super::defaults;

/// Classifier artifact configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path to the symptom schema JSON. `None` selects the built-in schema.
    pub schema_path: Option<String>,
    /// Path to the label↔index mapping JSON.
    pub labels_path: String,
    /// Path to the trained model artifact.
    pub model_path: String,
    /// Model provider: "forest" or "onnx".
    pub model_format: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            schema_path: Some(defaults::DEFAULT_SCHEMA_PATH.to_string()),
            labels_path: defaults::DEFAULT_LABELS_PATH.to_string(),
            model_path: defaults::DEFAULT_MODEL_PATH.to_string(),
            model_format: defaults::DEFAULT_MODEL_FORMAT.to_string(),
        }
    }
}
