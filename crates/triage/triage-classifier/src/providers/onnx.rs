//! ONNX Runtime classifier provider.
//!
//! Expects a converted classifier with one float input of shape
//! `[1, n_features]` and a float probability output of shape `[1, n_classes]`
//! (convert with the probability map disabled so the output is a tensor).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;
use triage_core::errors::{ClassifierError, TriageResult};
use triage_core::models::FeatureVector;
use triage_core::traits::IProbabilisticClassifier;

pub struct OnnxClassifier {
    /// `Session::run` needs `&mut self`; the mutex gives `&self` access.
    session: Mutex<Session>,
    n_features: usize,
    n_classes: usize,
    model_name: String,
}

impl OnnxClassifier {
    /// Load a model and probe it once with an all-zero vector to learn the
    /// class count.
    pub fn load(model_path: &Path, n_features: usize) -> Result<Self, ClassifierError> {
        let load_err = |reason: String| ClassifierError::ArtifactLoad {
            path: model_path.display().to_string(),
            reason,
        };

        if !model_path.exists() {
            return Err(load_err("model file not found".to_string()));
        }

        let session = Session::builder()
            .map_err(|e| load_err(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e| load_err(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| load_err(e.to_string()))?;

        let model_name = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        let mut classifier = Self {
            session: Mutex::new(session),
            n_features,
            n_classes: 0,
            model_name,
        };
        let probe = classifier
            .run(&FeatureVector::zeros(n_features))
            .map_err(|e| load_err(format!("probe inference failed: {e}")))?;
        classifier.n_classes = probe.len();

        debug!(model = %classifier.model_name, classes = classifier.n_classes, "ONNX classifier loaded");
        Ok(classifier)
    }

    fn run(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        let input = Tensor::from_array((vec![1i64, self.n_features as i64], features.to_f32()))
            .map_err(|e| ClassifierError::InferenceFailed {
                reason: format!("tensor creation error: {e}"),
            })?;

        let mut session = self.session.lock().map_err(|e| ClassifierError::InferenceFailed {
            reason: format!("session lock poisoned: {e}"),
        })?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ClassifierError::InferenceFailed {
                reason: e.to_string(),
            })?;

        // The label output is an integer tensor; the first float tensor is
        // the probability matrix.
        for (_name, output) in outputs.iter() {
            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                let width = shape.last().copied().unwrap_or(0).max(0) as usize;
                return Ok(data[..width.min(data.len())]
                    .iter()
                    .map(|&p| f64::from(p))
                    .collect());
            }
        }
        Err(ClassifierError::InferenceFailed {
            reason: "no float probability output".to_string(),
        })
    }
}

impl IProbabilisticClassifier for OnnxClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> TriageResult<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(ClassifierError::FeatureLengthMismatch {
                expected: self.n_features,
                actual: features.len(),
            }
            .into());
        }
        Ok(self.run(features)?)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
