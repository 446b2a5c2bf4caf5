//! L1 in-memory knowledge mirror using moka.
//!
//! TinyLFU admission, capacity-bounded. No TTL: cached entries never change.

use moka::sync::Cache;

use triage_core::models::KnowledgeEntry;

pub struct L1MemoryCache {
    cache: Cache<String, KnowledgeEntry>,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub fn get(&self, label: &str) -> Option<KnowledgeEntry> {
        self.cache.get(label)
    }

    pub fn insert(&self, label: String, entry: KnowledgeEntry) {
        self.cache.insert(label, entry);
    }

    /// Approximate; moka applies pending writes lazily.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
