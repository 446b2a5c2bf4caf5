//! Span definitions per operation: inference and knowledge resolution.

/// Create an inference span.
#[macro_export]
macro_rules! inference_span {
    ($symptom_count:expr) => {
        tracing::info_span!("triage.inference", symptom_count = $symptom_count)
    };
}

/// Create a knowledge resolution span.
#[macro_export]
macro_rules! resolution_span {
    ($label:expr) => {
        tracing::info_span!("triage.resolution", label = %$label)
    };
}
