use serde::{Deserialize, Serialize};

/// Short summary returned by a knowledge source for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Canonical title the query resolved to.
    pub title: String,
    /// Plain-text summary, already bounded to a few sentences.
    pub text: String,
}

/// A named section of a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: String,
    /// Heading depth (2 for `== H ==`, 3 for `=== H ===`, ...).
    pub level: usize,
    /// Text between this heading and the next heading of any level.
    pub content: String,
}
