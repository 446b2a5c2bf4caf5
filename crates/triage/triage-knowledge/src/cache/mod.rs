//! Two-tier knowledge cache.
//!
//! L1: bounded moka mirror, in-process.
//! L2: any durable `IKnowledgeCache` (SQLite in production). Authoritative;
//! L1 eviction never loses data.

mod l1_memory;

use std::sync::Arc;

use tracing::debug;

use triage_core::errors::TriageResult;
use triage_core::models::KnowledgeEntry;
use triage_core::traits::IKnowledgeCache;

pub use l1_memory::L1MemoryCache;

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHitTier {
    L1,
    L2,
    Miss,
}

pub struct KnowledgeCacheCoordinator {
    l1: L1MemoryCache,
    l2: Arc<dyn IKnowledgeCache>,
}

impl KnowledgeCacheCoordinator {
    pub fn new(l2: Arc<dyn IKnowledgeCache>, l1_capacity: u64) -> Self {
        Self {
            l1: L1MemoryCache::new(l1_capacity),
            l2,
        }
    }

    /// Look up `label`, promoting L2 hits into L1.
    pub fn lookup(&self, label: &str) -> TriageResult<(Option<KnowledgeEntry>, CacheHitTier)> {
        if let Some(entry) = self.l1.get(label) {
            return Ok((Some(entry), CacheHitTier::L1));
        }
        match self.l2.get(label)? {
            Some(entry) => {
                self.l1.insert(label.to_string(), entry.clone());
                Ok((Some(entry), CacheHitTier::L2))
            }
            None => Ok((None, CacheHitTier::Miss)),
        }
    }

    /// Write-through: L2 first, L1 only once the durable write succeeded.
    pub fn store(&self, label: &str, entry: &KnowledgeEntry) -> TriageResult<()> {
        self.l2.put(label, entry)?;
        self.l1.insert(label.to_string(), entry.clone());
        Ok(())
    }

    pub fn l1(&self) -> &L1MemoryCache {
        &self.l1
    }
}

impl IKnowledgeCache for KnowledgeCacheCoordinator {
    fn get(&self, label: &str) -> TriageResult<Option<KnowledgeEntry>> {
        let (entry, tier) = self.lookup(label)?;
        if entry.is_some() {
            debug!(label, tier = ?tier, "knowledge cache hit");
        }
        Ok(entry)
    }

    fn put(&self, label: &str, entry: &KnowledgeEntry) -> TriageResult<()> {
        self.store(label, entry)
    }

    fn entry_count(&self) -> TriageResult<usize> {
        self.l2.entry_count()
    }
}
