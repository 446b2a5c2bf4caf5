use serde::{Deserialize, Serialize};

/// Upper bound on precautions per entry.
pub const MAX_PRECAUTIONS: usize = 5;

/// Resolved descriptive knowledge for one condition label.
///
/// Immutable once cached: there is no update or invalidation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub description: String,
    pub precautions: Vec<String>,
}

impl KnowledgeEntry {
    pub fn new(description: impl Into<String>, precautions: Vec<String>) -> Self {
        Self {
            description: description.into(),
            precautions,
        }
    }

    /// Build an entry from static sentence lists (fallback tiers).
    pub fn from_static(description: impl Into<String>, precautions: &[&str]) -> Self {
        Self::new(
            description,
            precautions.iter().map(|p| p.to_string()).collect(),
        )
    }

    /// Entries must carry between one and five precautions.
    pub fn is_well_formed(&self) -> bool {
        (1..=MAX_PRECAUTIONS).contains(&self.precautions.len())
    }
}
