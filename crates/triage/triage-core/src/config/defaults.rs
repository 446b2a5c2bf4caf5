// Single source of truth for all default values.

// --- Classifier ---
pub const DEFAULT_MODEL_FORMAT: &str = "forest";
pub const DEFAULT_SCHEMA_PATH: &str = "artifacts/symptom_schema.json";
pub const DEFAULT_LABELS_PATH: &str = "artifacts/labels.json";
pub const DEFAULT_MODEL_PATH: &str = "artifacts/disease_forest.json";

// --- Ranking ---
pub const DEFAULT_TOP_K: usize = 3;

// --- Knowledge ---
pub const DEFAULT_KNOWLEDGE_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_QUERY_QUALIFIER: &str = " (medical condition)";
pub const DEFAULT_SUMMARY_SENTENCES: usize = 2;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_PRECAUTIONS: usize = 5;
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 30;
pub const DEFAULT_USER_AGENT: &str = "triage/0.1 (knowledge enrichment)";
pub const DEFAULT_SECTION_KEYWORDS: [&str; 5] =
    ["prevention", "management", "treatment", "prognosis", "lifestyle"];

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "triage.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 1_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
