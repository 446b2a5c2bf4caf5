use serde::{Deserialize, Serialize};

use super::{KnowledgeEntry, RankedClass};

/// Final per-class result returned to callers of `infer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub disease: String,
    /// Percentage rounded to two decimals.
    pub confidence: f64,
    pub description: String,
    pub precautions: Vec<String>,
}

impl PredictionRecord {
    pub fn assemble(ranked: &RankedClass, knowledge: KnowledgeEntry) -> Self {
        Self {
            disease: ranked.label.clone(),
            confidence: ranked.confidence,
            description: knowledge.description,
            precautions: knowledge.precautions,
        }
    }
}
