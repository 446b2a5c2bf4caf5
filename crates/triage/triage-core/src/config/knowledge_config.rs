use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge enrichment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// MediaWiki API endpoint.
    pub endpoint: String,
    /// Suffix appended to a label to bias lookups toward the medical sense.
    pub query_qualifier: String,
    /// Sentence bound for the description summary.
    pub summary_sentences: usize,
    /// Deadline per external stage, in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Section-title keywords (case-insensitive substring match).
    pub section_keywords: Vec<String>,
    /// Maximum extracted precautions per entry.
    pub max_precautions: usize,
    /// Fragments must be strictly longer than this to qualify.
    pub min_sentence_chars: usize,
    /// User-Agent header sent to the knowledge source.
    pub user_agent: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_KNOWLEDGE_ENDPOINT.to_string(),
            query_qualifier: defaults::DEFAULT_QUERY_QUALIFIER.to_string(),
            summary_sentences: defaults::DEFAULT_SUMMARY_SENTENCES,
            fetch_timeout_ms: defaults::DEFAULT_FETCH_TIMEOUT_MS,
            section_keywords: defaults::DEFAULT_SECTION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            max_precautions: defaults::DEFAULT_MAX_PRECAUTIONS,
            min_sentence_chars: defaults::DEFAULT_MIN_SENTENCE_CHARS,
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
        }
    }
}
