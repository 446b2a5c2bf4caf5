//! Classifier provider registry.
//!
//! - `forest`: JSON random-forest artifact, pure Rust (default)
//! - `onnx`: ONNX Runtime session (requires the `onnx` feature)

pub mod forest;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use forest::{ForestClassifier, ForestModel, TreeModel};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

use std::path::Path;
use std::sync::Arc;

use triage_core::config::ClassifierConfig;
use triage_core::errors::{ClassifierError, TriageResult};
use triage_core::traits::IProbabilisticClassifier;
use tracing::info;

use crate::schema::SymptomSchema;

/// Load the configured classifier. Unlike knowledge sources there is no
/// fallback provider: a model that cannot be loaded stops startup.
pub fn load_classifier(
    config: &ClassifierConfig,
    schema: &SymptomSchema,
) -> TriageResult<Arc<dyn IProbabilisticClassifier>> {
    let path = Path::new(&config.model_path);
    match config.model_format.as_str() {
        "forest" => {
            let forest = ForestClassifier::load(path)?;
            forest.verify_schema(schema)?;
            info!(provider = "forest", trees = forest.tree_count(), "classifier loaded");
            Ok(Arc::new(forest))
        }
        #[cfg(feature = "onnx")]
        "onnx" => {
            let onnx = OnnxClassifier::load(path, schema.len())?;
            info!(provider = "onnx", "classifier loaded");
            Ok(Arc::new(onnx))
        }
        other => Err(ClassifierError::ArtifactLoad {
            path: config.model_path.clone(),
            reason: format!("unsupported model format: {other}"),
        }
        .into()),
    }
}
