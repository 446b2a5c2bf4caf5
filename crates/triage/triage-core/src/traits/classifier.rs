use crate::errors::TriageResult;
use crate::models::FeatureVector;

/// Pre-trained multi-class probabilistic classifier.
///
/// Loaded once at startup and read-only afterwards.
pub trait IProbabilisticClassifier: Send + Sync {
    /// Per-class probabilities for one feature vector, index-aligned with the
    /// label↔index mapping. Values need not sum to exactly 1.
    fn predict_proba(&self, features: &FeatureVector) -> TriageResult<Vec<f64>>;

    /// Expected feature-vector length.
    fn n_features(&self) -> usize;

    /// Number of classes the model distinguishes.
    fn n_classes(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
