//! DiagnosisPipeline: symptoms → ranked, knowledge-enriched prediction records.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use triage_classifier::{parse_symptom_list, ArtifactBundle, FeatureEncoder, LabelIndex, Ranker};
use triage_core::errors::{ClassifierError, TriageResult};
use triage_core::models::{PredictionHistoryRecord, PredictionRecord, RankedClass};
use triage_core::traits::{IHistorySink, IProbabilisticClassifier};
use triage_knowledge::KnowledgeResolver;

use crate::tracing_setup::events;
use crate::{inference_span, resolution_span};

/// One inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceRequest {
    /// Opaque identity context forwarded to the history sink.
    pub identity: Option<String>,
    /// Symptom names, matched case-sensitively against the schema.
    pub symptoms: Vec<String>,
}

impl InferenceRequest {
    pub fn new(symptoms: Vec<String>) -> Self {
        Self {
            identity: None,
            symptoms,
        }
    }

    /// Build a request from a comma-separated form value.
    pub fn from_form(raw: &str) -> Self {
        Self::new(parse_symptom_list(raw))
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }
}

pub struct DiagnosisPipeline {
    encoder: FeatureEncoder,
    labels: Arc<LabelIndex>,
    classifier: Arc<dyn IProbabilisticClassifier>,
    ranker: Ranker,
    resolver: Arc<KnowledgeResolver>,
    history: Option<Arc<dyn IHistorySink>>,
}

impl DiagnosisPipeline {
    pub fn new(bundle: ArtifactBundle, ranker: Ranker, resolver: Arc<KnowledgeResolver>) -> Self {
        Self {
            encoder: FeatureEncoder::new(bundle.schema),
            labels: bundle.labels,
            classifier: bundle.classifier,
            ranker,
            resolver,
            history: None,
        }
    }

    /// Emit one history record per non-empty request to `sink`.
    pub fn with_history(mut self, sink: Arc<dyn IHistorySink>) -> Self {
        self.history = Some(sink);
        self
    }

    /// Run the full pipeline. Empty or all-unknown symptom sets yield an empty
    /// result without touching the classifier. Knowledge and history failures
    /// never surface here; only a classifier fault does.
    pub fn infer(&self, request: &InferenceRequest) -> TriageResult<Vec<PredictionRecord>> {
        let span = inference_span!(request.symptoms.len());
        let _guard = span.enter();

        let features = self.encoder.encode(&request.symptoms);
        if features.is_all_zero() {
            debug!(
                unknown = ?self.encoder.unknown(&request.symptoms),
                "no known symptoms, skipping classification"
            );
            return Ok(Vec::new());
        }

        let probabilities = self.classifier.predict_proba(&features)?;
        let ranked = self.ranker.rank(&probabilities, &self.labels)?;

        let records: Vec<PredictionRecord> = ranked.iter().map(|r| self.enrich(r)).collect();

        let diseases: Vec<String> = records.iter().map(|r| r.disease.clone()).collect();
        events::prediction_completed(request.symptoms.len(), features.active_count(), &diseases);
        self.record_history(request, diseases, &records);

        Ok(records)
    }

    /// Convenience form of [`Self::infer`] for anonymous callers.
    pub fn infer_symptoms<S: AsRef<str>>(&self, symptoms: &[S]) -> TriageResult<Vec<PredictionRecord>> {
        let request = InferenceRequest::new(symptoms.iter().map(|s| s.as_ref().to_string()).collect());
        self.infer(&request)
    }

    /// Run [`Self::infer`] on tokio's blocking pool.
    pub async fn infer_async(
        self: Arc<Self>,
        request: InferenceRequest,
    ) -> TriageResult<Vec<PredictionRecord>> {
        match tokio::task::spawn_blocking(move || self.infer(&request)).await {
            Ok(result) => result,
            Err(e) => Err(ClassifierError::InferenceFailed {
                reason: format!("inference task failed: {e}"),
            }
            .into()),
        }
    }

    fn enrich(&self, ranked: &RankedClass) -> PredictionRecord {
        let span = resolution_span!(ranked.label);
        let _guard = span.enter();
        let resolution = self.resolver.resolve_detailed(&ranked.label);
        for event in &resolution.events {
            events::knowledge_degraded(&event.component, &event.failure, &event.fallback_used);
        }
        PredictionRecord::assemble(ranked, resolution.entry)
    }

    fn record_history(
        &self,
        request: &InferenceRequest,
        ranked_diseases: Vec<String>,
        records: &[PredictionRecord],
    ) {
        let Some(sink) = &self.history else {
            return;
        };
        let record = PredictionHistoryRecord {
            identity: request.identity.clone(),
            symptoms: request.symptoms.clone(),
            ranked_diseases,
            results: records.to_vec(),
            timestamp: Utc::now(),
            nonce: Uuid::new_v4().to_string(),
        };
        if let Err(e) = sink.record(&record) {
            events::history_write_failed(&record.nonce, &e.to_string());
        }
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    pub fn resolver(&self) -> &KnowledgeResolver {
        &self.resolver
    }
}
