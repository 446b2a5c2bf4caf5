use crate::errors::KnowledgeResult;
use crate::models::{DocumentSection, SourceSummary};

/// Read-only external encyclopedia. Untrusted, possibly slow or absent.
pub trait IKnowledgeSource: Send + Sync {
    /// Resolve `query` to a document and return its leading summary, bounded
    /// to `max_sentences` sentences.
    fn fetch_summary(&self, query: &str, max_sentences: usize) -> KnowledgeResult<SourceSummary>;

    /// Sections of the document with the given canonical title.
    fn fetch_sections(&self, title: &str) -> KnowledgeResult<Vec<DocumentSection>>;

    /// Human-readable source name.
    fn name(&self) -> &str;
}
