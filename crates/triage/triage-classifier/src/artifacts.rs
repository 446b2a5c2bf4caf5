//! Startup loading of the schema, label mapping, and model as one unit.
//!
//! All three come from the same training run. Any inconsistency between them
//! is fatal: the caller must not start serving.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use triage_core::config::ClassifierConfig;
use triage_core::errors::{ClassifierError, TriageResult};
use triage_core::traits::IProbabilisticClassifier;

use crate::labels::LabelIndex;
use crate::providers;
use crate::schema::SymptomSchema;

/// Validated, immutable classifier artifacts shared by all requests.
#[derive(Clone)]
pub struct ArtifactBundle {
    pub schema: Arc<SymptomSchema>,
    pub labels: Arc<LabelIndex>,
    pub classifier: Arc<dyn IProbabilisticClassifier>,
}

impl ArtifactBundle {
    /// Load every artifact named by `config` and cross-check them.
    pub fn load(config: &ClassifierConfig) -> TriageResult<Self> {
        let schema = match &config.schema_path {
            Some(path) => SymptomSchema::load(Path::new(path))?,
            None => SymptomSchema::builtin(),
        };
        let labels = LabelIndex::load(Path::new(&config.labels_path))?;
        let classifier = providers::load_classifier(config, &schema)?;
        Self::from_parts(schema, labels, classifier)
    }

    /// Assemble a bundle from already-loaded parts, applying the same checks.
    pub fn from_parts(
        schema: SymptomSchema,
        labels: LabelIndex,
        classifier: Arc<dyn IProbabilisticClassifier>,
    ) -> TriageResult<Self> {
        if classifier.n_features() != schema.len() {
            return Err(ClassifierError::ArtifactMismatch {
                details: format!(
                    "model expects {} features, schema {} defines {}",
                    classifier.n_features(),
                    schema.version(),
                    schema.len()
                ),
            }
            .into());
        }
        if classifier.n_classes() != labels.len() {
            return Err(ClassifierError::ArtifactMismatch {
                details: format!(
                    "model predicts {} classes, label mapping has {}",
                    classifier.n_classes(),
                    labels.len()
                ),
            }
            .into());
        }

        info!(
            provider = classifier.name(),
            schema_version = schema.version(),
            features = schema.len(),
            classes = labels.len(),
            "classifier artifacts validated"
        );

        Ok(Self {
            schema: Arc::new(schema),
            labels: Arc::new(labels),
            classifier,
        })
    }
}
