//! Shared test support for the triage workspace.
//!
//! Provides fixture artifact loading plus scripted doubles for every seam in
//! `triage_core::traits`: a fixed-output classifier, a scripted knowledge
//! source, an in-memory knowledge cache, and recording/failing history sinks.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use triage_core::errors::{KnowledgeError, KnowledgeResult, StorageError, TriageResult};
use triage_core::models::{
    DocumentSection, FeatureVector, KnowledgeEntry, PredictionHistoryRecord, SourceSummary,
};
use triage_core::traits::{IHistorySink, IKnowledgeCache, IKnowledgeSource, IProbabilisticClassifier};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("artifacts").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/artifacts from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Paths of the fixture artifact trio, as strings for config structs.
pub struct FixtureArtifacts {
    pub schema_path: String,
    pub labels_path: String,
    pub model_path: String,
}

pub fn fixture_artifacts() -> FixtureArtifacts {
    let s = |p: &str| fixture_path(p).display().to_string();
    FixtureArtifacts {
        schema_path: s("artifacts/symptom_schema.json"),
        labels_path: s("artifacts/labels.json"),
        model_path: s("artifacts/disease_forest.json"),
    }
}

// ── Classifier ────────────────────────────────────────────────────────────

/// Returns the same probability vector for every input.
pub struct FixedClassifier {
    probabilities: Vec<f64>,
    n_features: usize,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(n_features: usize, probabilities: Vec<f64>) -> Self {
        Self {
            probabilities,
            n_features,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IProbabilisticClassifier for FixedClassifier {
    fn predict_proba(&self, _features: &FeatureVector) -> TriageResult<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.probabilities.clone())
    }
    fn n_features(&self) -> usize {
        self.n_features
    }
    fn n_classes(&self) -> usize {
        self.probabilities.len()
    }
    fn name(&self) -> &str {
        "fixed-mock"
    }
}

// ── Knowledge source ──────────────────────────────────────────────────────

/// What a scripted source does when asked for a given query.
#[derive(Clone)]
pub enum SourceScript {
    /// Summary succeeds; sections are returned as given.
    Article {
        summary: String,
        sections: Vec<DocumentSection>,
    },
    /// Summary succeeds; the section fetch fails.
    SectionsFail { summary: String },
    /// Every call fails as if the network were down.
    Unreachable,
    /// The query resolves to a disambiguation page.
    Ambiguous,
    /// Sleeps before answering with the inner script.
    Slow(Duration, Box<SourceScript>),
}

/// Knowledge source double with call counters.
pub struct ScriptedKnowledgeSource {
    default: SourceScript,
    per_query: HashMap<String, SourceScript>,
    summary_calls: AtomicUsize,
    section_calls: AtomicUsize,
}

impl ScriptedKnowledgeSource {
    pub fn new(default: SourceScript) -> Self {
        Self {
            default,
            per_query: HashMap::new(),
            summary_calls: AtomicUsize::new(0),
            section_calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self::new(SourceScript::Unreachable)
    }

    /// Override the script for one exact query string.
    pub fn with_query(mut self, query: &str, script: SourceScript) -> Self {
        self.per_query.insert(query.to_string(), script);
        self
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn section_calls(&self) -> usize {
        self.section_calls.load(Ordering::SeqCst)
    }

    /// Total external fetches of either kind.
    pub fn total_calls(&self) -> usize {
        self.summary_calls() + self.section_calls()
    }

    fn script_for(&self, key: &str) -> SourceScript {
        self.per_query
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    fn unreachable_error() -> KnowledgeError {
        KnowledgeError::Unavailable {
            source_name: "scripted".to_string(),
            reason: "connection refused".to_string(),
        }
    }
}

/// Titles handed back by the scripted source are the query itself, so a
/// per-query override also applies to the follow-up section fetch.
impl IKnowledgeSource for ScriptedKnowledgeSource {
    fn fetch_summary(&self, query: &str, _max_sentences: usize) -> KnowledgeResult<SourceSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script_for(query);
        loop {
            match script {
                SourceScript::Slow(delay, inner) => {
                    std::thread::sleep(delay);
                    script = *inner;
                }
                SourceScript::Article { summary, .. } | SourceScript::SectionsFail { summary } => {
                    return Ok(SourceSummary {
                        title: query.to_string(),
                        text: summary,
                    })
                }
                SourceScript::Unreachable => return Err(Self::unreachable_error()),
                SourceScript::Ambiguous => {
                    return Err(KnowledgeError::Ambiguous {
                        query: query.to_string(),
                    })
                }
            }
        }
    }

    fn fetch_sections(&self, title: &str) -> KnowledgeResult<Vec<DocumentSection>> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script_for(title);
        loop {
            match script {
                SourceScript::Slow(delay, inner) => {
                    std::thread::sleep(delay);
                    script = *inner;
                }
                SourceScript::Article { sections, .. } => return Ok(sections),
                SourceScript::SectionsFail { .. } | SourceScript::Unreachable => {
                    return Err(Self::unreachable_error())
                }
                SourceScript::Ambiguous => {
                    return Err(KnowledgeError::Ambiguous {
                        query: title.to_string(),
                    })
                }
            }
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Convenience constructor for a document section.
pub fn section(title: &str, content: &str) -> DocumentSection {
    DocumentSection {
        title: title.to_string(),
        level: 2,
        content: content.to_string(),
    }
}

// ── Knowledge cache ───────────────────────────────────────────────────────

/// In-memory knowledge cache with put counting.
#[derive(Default)]
pub struct MemoryKnowledgeCache {
    entries: Mutex<HashMap<String, KnowledgeEntry>>,
    puts: AtomicUsize,
}

impl MemoryKnowledgeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries
            .lock()
            .map(|m| m.contains_key(label))
            .unwrap_or(false)
    }
}

impl IKnowledgeCache for MemoryKnowledgeCache {
    fn get(&self, label: &str) -> TriageResult<Option<KnowledgeEntry>> {
        let map = self.entries.lock().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        Ok(map.get(label).cloned())
    }

    fn put(&self, label: &str, entry: &KnowledgeEntry) -> TriageResult<()> {
        let mut map = self.entries.lock().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        map.insert(label.to_string(), entry.clone());
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn entry_count(&self) -> TriageResult<usize> {
        let map = self.entries.lock().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        Ok(map.len())
    }
}

/// Cache whose every operation fails, for degraded-storage paths.
pub struct BrokenKnowledgeCache;

impl IKnowledgeCache for BrokenKnowledgeCache {
    fn get(&self, _label: &str) -> TriageResult<Option<KnowledgeEntry>> {
        Err(StorageError::SqliteError {
            message: "database is locked".to_string(),
        }
        .into())
    }
    fn put(&self, _label: &str, _entry: &KnowledgeEntry) -> TriageResult<()> {
        Err(StorageError::SqliteError {
            message: "database is locked".to_string(),
        }
        .into())
    }
    fn entry_count(&self) -> TriageResult<usize> {
        Ok(0)
    }
}

// ── History sinks ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingHistorySink {
    records: Mutex<Vec<PredictionHistoryRecord>>,
}

impl RecordingHistorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<PredictionHistoryRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl IHistorySink for RecordingHistorySink {
    fn record(&self, record: &PredictionHistoryRecord) -> TriageResult<()> {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }
}

/// Sink that always fails.
pub struct FailingHistorySink;

impl IHistorySink for FailingHistorySink {
    fn record(&self, _record: &PredictionHistoryRecord) -> TriageResult<()> {
        Err(StorageError::SqliteError {
            message: "disk I/O error".to_string(),
        }
        .into())
    }
}
