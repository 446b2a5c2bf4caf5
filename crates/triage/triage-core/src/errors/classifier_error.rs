/// Classifier artifact and inference errors.
///
/// `ArtifactLoad` and `ArtifactMismatch` are startup-fatal: a runtime that
/// sees either must refuse to serve.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("artifact load failed: {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("artifact mismatch: {details}")]
    ArtifactMismatch { details: String },

    #[error("feature length mismatch: expected {expected}, got {actual}")]
    FeatureLengthMismatch { expected: usize, actual: usize },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },
}
