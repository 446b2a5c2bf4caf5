//! get, upsert, count and merge-import for `knowledge_entries`.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use triage_core::errors::{StorageError, TriageResult};
use triage_core::models::KnowledgeEntry;

use crate::to_storage_err;

/// Fetch the entry stored under `label`, if any.
pub fn get_entry(conn: &Connection, label: &str) -> TriageResult<Option<KnowledgeEntry>> {
    let row = conn
        .query_row(
            "SELECT description, precautions FROM knowledge_entries WHERE label = ?1",
            params![label],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(format!("get knowledge entry {label}: {e}")))?;

    match row {
        None => Ok(None),
        Some((description, precautions_json)) => {
            let precautions: Vec<String> =
                serde_json::from_str(&precautions_json).map_err(|e| {
                    StorageError::CorruptEntry {
                        label: label.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            Ok(Some(KnowledgeEntry::new(description, precautions)))
        }
    }
}

/// Insert or replace the single row for `label`. Other rows are untouched.
pub fn upsert_entry(conn: &Connection, label: &str, entry: &KnowledgeEntry) -> TriageResult<()> {
    let precautions = serde_json::to_string(&entry.precautions)?;
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = tx.execute(
        "INSERT OR REPLACE INTO knowledge_entries (label, description, precautions, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![label, entry.description, precautions, Utc::now().to_rfc3339()],
    );

    match result {
        Ok(_) => tx
            .commit()
            .map_err(|e| to_storage_err(format!("commit knowledge entry {label}: {e}"))),
        Err(e) => {
            let _ = tx.rollback();
            Err(to_storage_err(format!("upsert knowledge entry {label}: {e}")))
        }
    }
}

/// Number of stored entries.
pub fn count_entries(conn: &Connection) -> TriageResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM knowledge_entries", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as usize)
}

/// Merge `entries` into the table without overwriting existing labels.
/// Returns how many rows were actually inserted.
pub fn import_entries(
    conn: &Connection,
    entries: &[(String, KnowledgeEntry)],
) -> TriageResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let now = Utc::now().to_rfc3339();
    let mut inserted = 0;

    for (label, entry) in entries {
        let precautions = serde_json::to_string(&entry.precautions)?;
        match tx.execute(
            "INSERT OR IGNORE INTO knowledge_entries (label, description, precautions, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![label, entry.description, precautions, now],
        ) {
            Ok(n) => inserted += n,
            Err(e) => {
                let _ = tx.rollback();
                return Err(to_storage_err(format!("import knowledge entry {label}: {e}")));
            }
        }
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("commit legacy import: {e}")))?;
    Ok(inserted)
}
