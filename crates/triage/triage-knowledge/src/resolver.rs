//! Knowledge resolver: label → entry, never failing.
//!
//! Each stage yields an explicit outcome and [`decide`] maps the combination
//! onto one of four tiers:
//!
//! | primary fetch | section scan           | entry                              | cached |
//! |---------------|------------------------|------------------------------------|--------|
//! | (cache hit)   |                        | stored entry                       | -      |
//! | found         | matched, non-empty     | summary + extracted precautions    | yes    |
//! | found         | no match / failed      | summary + generic precautions      | yes    |
//! | failed        | (not attempted)        | synthetic description + precautions| no     |

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use triage_core::config::KnowledgeConfig;
use triage_core::constants::{synthetic_description, GENERIC_PRECAUTIONS, SYNTHETIC_PRECAUTIONS};
use triage_core::errors::KnowledgeError;
use triage_core::models::{DegradationEvent, KnowledgeEntry, SourceSummary, MAX_PRECAUTIONS};
use triage_core::traits::{IKnowledgeCache, IKnowledgeSource};

use crate::deadline::run_with_deadline;
use crate::document::collect_matching;
use crate::extraction::extract_precautions;

const COMPONENT: &str = "knowledge";

/// Where a resolved entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Cache,
    Source,
    SourceGenericPrecautions,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub entry: KnowledgeEntry,
    pub provenance: Provenance,
    /// Fallbacks taken while resolving this label only.
    pub events: Vec<DegradationEvent>,
}

impl Resolution {
    fn new(entry: KnowledgeEntry, provenance: Provenance) -> Self {
        Self {
            entry,
            provenance,
            events: Vec::new(),
        }
    }
}

#[derive(Debug)]
enum PrimaryOutcome {
    Found(SourceSummary),
    Failed(KnowledgeError),
}

#[derive(Debug)]
enum SectionOutcome {
    Matched(String),
    NoMatch,
    Failed(KnowledgeError),
}

fn decide(
    label: &str,
    primary: PrimaryOutcome,
    sections: Option<SectionOutcome>,
    config: &KnowledgeConfig,
) -> Resolution {
    match (primary, sections) {
        (PrimaryOutcome::Found(summary), Some(SectionOutcome::Matched(buffer))) => {
            let max = config.max_precautions.clamp(1, MAX_PRECAUTIONS);
            Resolution::new(
                KnowledgeEntry::new(
                    summary.text,
                    extract_precautions(&buffer, max, config.min_sentence_chars),
                ),
                Provenance::Source,
            )
        }
        (PrimaryOutcome::Found(summary), _) => Resolution::new(
            KnowledgeEntry::from_static(summary.text, &GENERIC_PRECAUTIONS),
            Provenance::SourceGenericPrecautions,
        ),
        (PrimaryOutcome::Failed(_), _) => Resolution::new(
            KnowledgeEntry::from_static(synthetic_description(label), &SYNTHETIC_PRECAUTIONS),
            Provenance::Synthetic,
        ),
    }
}

fn degradation(failure: String, fallback_used: &str) -> DegradationEvent {
    DegradationEvent {
        component: COMPONENT.to_string(),
        failure,
        fallback_used: fallback_used.to_string(),
        timestamp: Utc::now(),
    }
}

pub struct KnowledgeResolver {
    cache: Arc<dyn IKnowledgeCache>,
    source: Arc<dyn IKnowledgeSource>,
    config: KnowledgeConfig,
}

impl KnowledgeResolver {
    pub fn new(
        cache: Arc<dyn IKnowledgeCache>,
        source: Arc<dyn IKnowledgeSource>,
        config: KnowledgeConfig,
    ) -> Self {
        Self {
            cache,
            source,
            config,
        }
    }

    /// Resolve `label` to an entry. Never fails.
    pub fn resolve(&self, label: &str) -> KnowledgeEntry {
        self.resolve_detailed(label).entry
    }

    /// Resolve `label`, also reporting which tier produced the entry and the
    /// fallbacks taken along the way.
    pub fn resolve_detailed(&self, label: &str) -> Resolution {
        let mut events = Vec::new();
        match self.cache.get(label) {
            Ok(Some(entry)) => {
                debug!(label, "knowledge served from cache");
                return Resolution::new(entry, Provenance::Cache);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(label, error = %e, "knowledge cache read failed, treating as miss");
                events.push(degradation(format!("cache read failed: {e}"), "source lookup"));
            }
        }

        let primary = self.fetch_primary(label);
        let sections = match &primary {
            PrimaryOutcome::Found(summary) => Some(self.scan_sections(&summary.title)),
            PrimaryOutcome::Failed(_) => None,
        };

        match (&primary, &sections) {
            (PrimaryOutcome::Failed(e), _) => {
                warn!(label, error = %e, "knowledge fetch failed, serving synthetic entry");
                events.push(degradation(e.to_string(), "synthetic entry"));
            }
            (_, Some(SectionOutcome::Failed(e))) => {
                warn!(label, error = %e, "section scan failed, using generic precautions");
                events.push(degradation(e.to_string(), "generic precautions"));
            }
            (_, Some(SectionOutcome::NoMatch)) => {
                debug!(label, "no matching sections, using generic precautions");
            }
            _ => {}
        }

        let mut resolution = decide(label, primary, sections, &self.config);
        if resolution.provenance != Provenance::Synthetic {
            if let Err(e) = self.cache.put(label, &resolution.entry) {
                warn!(label, error = %e, "knowledge cache write failed");
                events.push(degradation(format!("cache write failed: {e}"), "uncached entry"));
            }
        }
        resolution.events = events;
        resolution
    }

    fn deadline(&self) -> Duration {
        Duration::from_millis(self.config.fetch_timeout_ms)
    }

    fn fetch_primary(&self, label: &str) -> PrimaryOutcome {
        let source = Arc::clone(&self.source);
        let query = format!("{label}{}", self.config.query_qualifier);
        let sentences = self.config.summary_sentences;
        match run_with_deadline("summary", self.deadline(), move || {
            source.fetch_summary(&query, sentences)
        }) {
            Ok(summary) => PrimaryOutcome::Found(summary),
            Err(e) => PrimaryOutcome::Failed(e),
        }
    }

    fn scan_sections(&self, title: &str) -> SectionOutcome {
        let source = Arc::clone(&self.source);
        let owned_title = title.to_string();
        match run_with_deadline("sections", self.deadline(), move || {
            source.fetch_sections(&owned_title)
        }) {
            Ok(sections) => {
                let buffer = collect_matching(&sections, &self.config.section_keywords);
                if buffer.trim().is_empty() {
                    SectionOutcome::NoMatch
                } else {
                    SectionOutcome::Matched(buffer)
                }
            }
            Err(e) => SectionOutcome::Failed(e),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}
