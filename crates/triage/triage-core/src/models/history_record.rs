use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PredictionRecord;

/// Best-effort history record emitted once per inference request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionHistoryRecord {
    /// Originating identity context, opaque to the core.
    pub identity: Option<String>,
    /// Symptom names exactly as submitted.
    pub symptoms: Vec<String>,
    /// Ranked disease names, in ranked order.
    pub ranked_diseases: Vec<String>,
    pub results: Vec<PredictionRecord>,
    pub timestamp: DateTime<Utc>,
    /// Random per-request nonce for uniqueness.
    pub nonce: String,
}
