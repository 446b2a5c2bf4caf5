//! Structured log events for key pipeline operations.

/// Log a completed inference.
pub fn prediction_completed(symptom_count: usize, known_count: usize, diseases: &[String]) {
    tracing::info!(
        event = "prediction_completed",
        symptom_count,
        known_count,
        diseases = ?diseases,
        "prediction completed"
    );
}

/// Log a knowledge fallback.
pub fn knowledge_degraded(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "knowledge_degraded",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "knowledge degraded"
    );
}

/// Log a failed best-effort history write.
pub fn history_write_failed(nonce: &str, error: &str) {
    tracing::warn!(
        event = "history_write_failed",
        nonce = %nonce,
        error = %error,
        "history write failed"
    );
}
