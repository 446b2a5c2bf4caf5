//! Bounded waits on blocking external calls.
//!
//! The call runs on its own thread; the caller stops waiting after the
//! deadline. A timed-out worker is left to finish in the background and its
//! result is discarded.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use triage_core::errors::{KnowledgeError, KnowledgeResult};

pub fn run_with_deadline<T, F>(stage: &str, timeout: Duration, f: F) -> KnowledgeResult<T>
where
    F: FnOnce() -> KnowledgeResult<T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name(format!("triage-{stage}"))
        .spawn(move || {
            // The receiver is gone once the deadline passed.
            let _ = tx.send(f());
        })
        .map_err(|e| KnowledgeError::Unavailable {
            source_name: stage.to_string(),
            reason: format!("failed to spawn worker: {e}"),
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(KnowledgeError::Timeout {
            stage: stage.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(KnowledgeError::Unavailable {
            source_name: stage.to_string(),
            reason: "worker exited without a result".to_string(),
        }),
    }
}
