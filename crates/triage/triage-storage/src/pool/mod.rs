//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use triage_core::config::StorageConfig;
use triage_core::errors::TriageResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

use crate::migrations;

/// The single writer plus, for file-backed databases, a read pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer, bring the schema up to date, then open readers
    /// (read-only connections need the tables to exist).
    pub fn open(path: &Path, config: &StorageConfig) -> TriageResult<Self> {
        let writer = WriteConnection::open(path, config.busy_timeout_ms)?;
        writer.with_conn_sync(migrations::run_migrations)?;
        let readers = ReadPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory databases are private to their connection, so every read
    /// goes through the writer.
    pub fn open_in_memory() -> TriageResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        writer.with_conn_sync(migrations::run_migrations)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
