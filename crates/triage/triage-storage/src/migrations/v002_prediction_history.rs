//! v002: append-only prediction history.

use rusqlite::Connection;

use triage_core::errors::TriageResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TriageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS prediction_history (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            nonce            TEXT NOT NULL UNIQUE,
            identity         TEXT,
            symptoms         TEXT NOT NULL,
            ranked_diseases  TEXT NOT NULL,
            results          TEXT NOT NULL,
            created_at       TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_history_identity
            ON prediction_history(identity, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
