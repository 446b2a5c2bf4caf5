//! v001: durable knowledge cache, one row per condition label.

use rusqlite::Connection;

use triage_core::errors::TriageResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TriageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS knowledge_entries (
            label        TEXT PRIMARY KEY,
            description  TEXT NOT NULL,
            precautions  TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
