//! Error taxonomy: one enum per subsystem, unified under [`TriageError`].

mod classifier_error;
mod knowledge_error;
mod storage_error;

pub use classifier_error::ClassifierError;
pub use knowledge_error::{KnowledgeError, KnowledgeResult};
pub use storage_error::StorageError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("classifier error: {0}")]
    ClassifierError(#[from] ClassifierError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("knowledge error: {0}")]
    KnowledgeError(#[from] KnowledgeError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error on {path}: {reason}")]
    IoError { path: String, reason: String },
}

/// Convenience alias used across the workspace.
pub type TriageResult<T> = Result<T, TriageError>;
