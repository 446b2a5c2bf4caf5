//! Schema migrations, tracked in `schema_version`.

mod v001_knowledge_entries;
mod v002_prediction_history;

use rusqlite::{params, Connection};
use tracing::info;

use triage_core::errors::{StorageError, TriageResult};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> TriageResult<()>;

const MIGRATIONS: &[(u32, &str, MigrationFn)] = &[
    (1, "knowledge_entries", v001_knowledge_entries::migrate),
    (2, "prediction_history", v002_prediction_history::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Current schema version (0 for a fresh database).
pub fn current_version(conn: &Connection) -> TriageResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> TriageResult<()> {
    let current = current_version(conn)?;
    for (version, name, migrate) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        if let Err(e) = migrate(&tx) {
            let _ = tx.rollback();
            return Err(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            }
            .into());
        }
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        info!(version, name, "applied storage migration");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    }

    #[test]
    fn fresh_database_reports_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }
}
