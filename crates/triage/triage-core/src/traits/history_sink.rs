use crate::errors::TriageResult;
use crate::models::PredictionHistoryRecord;

/// Outbound persistence collaborator for per-request history.
///
/// Callers treat failures as best-effort: they are logged, never propagated.
pub trait IHistorySink: Send + Sync {
    fn record(&self, record: &PredictionHistoryRecord) -> TriageResult<()>;
}
