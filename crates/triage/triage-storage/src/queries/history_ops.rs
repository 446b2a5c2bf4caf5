//! Append and read back `prediction_history` rows.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use triage_core::errors::TriageResult;
use triage_core::models::PredictionHistoryRecord;

use crate::to_storage_err;

pub fn insert_record(conn: &Connection, record: &PredictionHistoryRecord) -> TriageResult<()> {
    let symptoms = serde_json::to_string(&record.symptoms)?;
    let ranked = serde_json::to_string(&record.ranked_diseases)?;
    let results = serde_json::to_string(&record.results)?;

    conn.execute(
        "INSERT INTO prediction_history
            (nonce, identity, symptoms, ranked_diseases, results, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.nonce,
            record.identity,
            symptoms,
            ranked,
            results,
            record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert history {}: {e}", record.nonce)))?;
    Ok(())
}

/// Most recent records for `identity`, newest first.
pub fn recent_records(
    conn: &Connection,
    identity: &str,
    limit: usize,
) -> TriageResult<Vec<PredictionHistoryRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT nonce, identity, symptoms, ranked_diseases, results, created_at
             FROM prediction_history
             WHERE identity = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![identity, limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let (nonce, identity, symptoms, ranked, results, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let timestamp = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| to_storage_err(format!("history {nonce} timestamp: {e}")))?
            .with_timezone(&Utc);
        records.push(PredictionHistoryRecord {
            identity,
            symptoms: serde_json::from_str(&symptoms)?,
            ranked_diseases: serde_json::from_str(&ranked)?,
            results: serde_json::from_str(&results)?,
            timestamp,
            nonce,
        });
    }
    Ok(records)
}
