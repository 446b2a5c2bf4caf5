use serde::{Deserialize, Serialize};

/// One ranked classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedClass {
    /// Index in the label↔index mapping.
    pub class_index: usize,
    pub label: String,
    /// Raw probability in [0, 1].
    pub probability: f64,
    /// Probability × 100, rounded to two decimals.
    pub confidence: f64,
}
