use crate::errors::TriageResult;
use crate::models::KnowledgeEntry;

/// Durable label → knowledge entry store.
///
/// `put` must never drop entries stored under other labels. Concurrent `put`s
/// to the same label may race; the last writer wins.
pub trait IKnowledgeCache: Send + Sync {
    fn get(&self, label: &str) -> TriageResult<Option<KnowledgeEntry>>;
    fn put(&self, label: &str, entry: &KnowledgeEntry) -> TriageResult<()>;
    fn entry_count(&self) -> TriageResult<usize>;
}
