//! # triage-storage
//!
//! SQLite persistence: the durable knowledge cache (one row per condition
//! label, upserted individually so unrelated labels are never rewritten) and
//! the best-effort prediction history sink.
//!
//! One serialized write connection, a round-robin pool of read connections
//! (WAL mode lets readers proceed while the writer commits).

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use triage_core::errors::{StorageError, TriageError};

/// Wrap any lower-level failure as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> TriageError {
    StorageError::SqliteError {
        message: message.into(),
    }
    .into()
}
