//! StorageEngine: owns the ConnectionPool and implements the durable
//! knowledge cache and the history sink.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::Connection;
use tracing::{info, warn};

use triage_core::config::StorageConfig;
use triage_core::errors::{TriageError, TriageResult};
use triage_core::models::{KnowledgeEntry, PredictionHistoryRecord};
use triage_core::traits::{IHistorySink, IKnowledgeCache};

use crate::pool::ConnectionPool;
use crate::queries::{history_ops, knowledge_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
    /// In-memory mode routes reads through the writer.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a file-backed database with default settings.
    pub fn open(path: &Path) -> TriageResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> TriageResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        info!(path = %path.display(), readers = config.read_pool_size, "storage opened");
        Ok(Self {
            pool,
            use_read_pool: true,
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> TriageResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        Ok(Self {
            pool,
            use_read_pool: false,
        })
    }

    fn with_reader<F, T>(&self, f: F) -> TriageResult<T>
    where
        F: FnOnce(&Connection) -> TriageResult<T>,
    {
        match (&self.pool.readers, self.use_read_pool) {
            (Some(readers), true) => readers.with_conn(f),
            _ => self.pool.writer.with_conn_sync(f),
        }
    }

    /// Merge a legacy JSON cache file (`{ label: { description, precautions } }`)
    /// into the store. Existing labels keep their stored value. Entries whose
    /// precaution count falls outside 1..=5 are skipped.
    /// Returns the number of labels inserted.
    pub fn import_legacy_json(&self, path: &Path) -> TriageResult<usize> {
        let raw = std::fs::read_to_string(path).map_err(|e| TriageError::IoError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let parsed: BTreeMap<String, KnowledgeEntry> = serde_json::from_str(&raw)?;
        let offered = parsed.len();
        let entries: Vec<(String, KnowledgeEntry)> = parsed
            .into_iter()
            .filter(|(label, entry)| {
                let keep = entry.is_well_formed();
                if !keep {
                    warn!(
                        label = %label,
                        precautions = entry.precautions.len(),
                        "skipping malformed legacy knowledge entry"
                    );
                }
                keep
            })
            .collect();
        let inserted = self
            .pool
            .writer
            .with_conn_sync(|conn| knowledge_ops::import_entries(conn, &entries))?;
        info!(
            path = %path.display(),
            offered,
            skipped = offered - entries.len(),
            inserted,
            "legacy knowledge cache imported"
        );
        Ok(inserted)
    }

    /// Most recent history records for one identity, newest first.
    pub fn recent_history(
        &self,
        identity: &str,
        limit: usize,
    ) -> TriageResult<Vec<PredictionHistoryRecord>> {
        self.with_reader(|conn| history_ops::recent_records(conn, identity, limit))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

impl IKnowledgeCache for StorageEngine {
    fn get(&self, label: &str) -> TriageResult<Option<KnowledgeEntry>> {
        self.with_reader(|conn| knowledge_ops::get_entry(conn, label))
    }

    fn put(&self, label: &str, entry: &KnowledgeEntry) -> TriageResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| knowledge_ops::upsert_entry(conn, label, entry))
    }

    fn entry_count(&self) -> TriageResult<usize> {
        self.with_reader(knowledge_ops::count_entries)
    }
}

impl IHistorySink for StorageEngine {
    fn record(&self, record: &PredictionHistoryRecord) -> TriageResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| history_ops::insert_record(conn, record))
    }
}
