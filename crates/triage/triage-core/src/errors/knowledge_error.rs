/// Failures of the external knowledge source.
///
/// None of these reach the caller of `infer`; the resolver maps each one onto
/// a fallback tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeError {
    #[error("knowledge source {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("no article found for query: {query}")]
    NotFound { query: String },

    #[error("ambiguous query: {query}")]
    Ambiguous { query: String },

    #[error("{stage} timed out after {timeout_ms}ms")]
    Timeout { stage: String, timeout_ms: u64 },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
