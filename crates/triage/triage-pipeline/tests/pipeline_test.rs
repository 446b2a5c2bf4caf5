//! End-to-end pipeline behaviour over the fixture artifacts.

use std::sync::Arc;

use triage_classifier::{ArtifactBundle, LabelIndex, Ranker, SymptomSchema};
use triage_core::config::{ClassifierConfig, TriageConfig};
use triage_core::constants::{GENERIC_PRECAUTIONS, SYNTHETIC_PRECAUTIONS};
use triage_core::errors::ClassifierError;
use triage_core::traits::IKnowledgeCache;
use triage_core::TriageError;
use triage_knowledge::KnowledgeResolver;
use triage_pipeline::{DiagnosisPipeline, InferenceRequest, TriageRuntime};
use triage_storage::StorageEngine;

use test_fixtures::{
    fixture_artifacts, fixture_path, section, FailingHistorySink, FixedClassifier,
    MemoryKnowledgeCache, RecordingHistorySink, ScriptedKnowledgeSource, SourceScript,
};

fn fixture_config() -> TriageConfig {
    let paths = fixture_artifacts();
    let mut config = TriageConfig::default();
    config.classifier = ClassifierConfig {
        schema_path: Some(paths.schema_path),
        labels_path: paths.labels_path,
        model_path: paths.model_path,
        model_format: "forest".to_string(),
    };
    config
}

fn article() -> SourceScript {
    SourceScript::Article {
        summary: "A well documented condition. It has known treatments.".into(),
        sections: vec![section(
            "Prevention",
            "Regular hand washing reduces the risk of infection. Avoid contact with sick people whenever possible.",
        )],
    }
}

fn runtime_with(source: Arc<ScriptedKnowledgeSource>) -> TriageRuntime {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    TriageRuntime::with_components(fixture_config(), storage, source).unwrap()
}

fn symptoms(names: &[&str]) -> InferenceRequest {
    InferenceRequest::new(names.iter().map(|s| s.to_string()).collect())
}

fn fixed_pipeline(
    probabilities: Vec<f64>,
) -> (DiagnosisPipeline, Arc<FixedClassifier>, Arc<RecordingHistorySink>) {
    let schema = SymptomSchema::load(&fixture_path("artifacts/symptom_schema.json")).unwrap();
    let labels = LabelIndex::load(&fixture_path("artifacts/labels.json")).unwrap();
    let classifier = Arc::new(FixedClassifier::new(schema.len(), probabilities));
    let bundle = ArtifactBundle::from_parts(schema, labels, classifier.clone()).unwrap();
    let resolver = Arc::new(KnowledgeResolver::new(
        Arc::new(MemoryKnowledgeCache::new()),
        Arc::new(ScriptedKnowledgeSource::new(article())),
        Default::default(),
    ));
    let sink = Arc::new(RecordingHistorySink::new());
    let pipeline = DiagnosisPipeline::new(bundle, Ranker::default(), resolver).with_history(sink.clone());
    (pipeline, classifier, sink)
}

#[test]
fn ranked_records_follow_classifier_probabilities() {
    let runtime = runtime_with(Arc::new(ScriptedKnowledgeSource::new(article())));

    let records = runtime.pipeline.infer(&symptoms(&["chills", "nausea"])).unwrap();

    let ranked: Vec<_> = records
        .iter()
        .map(|r| (r.disease.as_str(), r.confidence))
        .collect();
    assert_eq!(
        ranked,
        vec![("Malaria", 60.0), ("Common Cold", 30.0), ("Typhoid", 10.0)]
    );
    for record in &records {
        assert_eq!(
            record.description,
            "A well documented condition. It has known treatments."
        );
        assert_eq!(record.precautions.len(), 2);
    }
}

#[test]
fn unreachable_source_yields_synthetic_records_and_caches_nothing() {
    let runtime = runtime_with(Arc::new(ScriptedKnowledgeSource::unreachable()));

    let records = runtime.pipeline.infer(&symptoms(&["chills"])).unwrap();

    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(
            record.description,
            format!(
                "{} is a medical condition. Detailed information is limited at the moment.",
                record.disease
            )
        );
        assert_eq!(record.precautions, SYNTHETIC_PRECAUTIONS.map(String::from).to_vec());
        assert_eq!(runtime.storage.get(&record.disease).unwrap(), None);
    }
    assert_eq!(runtime.storage.entry_count().unwrap(), 0);
}

#[test]
fn repeated_requests_reuse_cached_knowledge() {
    let source = Arc::new(ScriptedKnowledgeSource::new(article()));
    let runtime = runtime_with(source.clone());

    let first = runtime.pipeline.infer(&symptoms(&["chills"])).unwrap();
    let calls = source.total_calls();
    let second = runtime.pipeline.infer(&symptoms(&["chills"])).unwrap();

    assert_eq!(first, second);
    assert_eq!(source.total_calls(), calls);
    assert_eq!(runtime.storage.entry_count().unwrap(), 3);
}

#[test]
fn section_failure_still_returns_cached_generic_precautions() {
    let source = Arc::new(ScriptedKnowledgeSource::new(SourceScript::SectionsFail {
        summary: "Summary only.".into(),
    }));
    let runtime = runtime_with(source);

    let records = runtime.pipeline.infer(&symptoms(&["headache"])).unwrap();

    assert_eq!(records[0].disease, "Migraine");
    assert_eq!(records[0].confidence, 80.0);
    assert_eq!(records[0].precautions, GENERIC_PRECAUTIONS.map(String::from).to_vec());
    assert!(runtime.storage.get("Migraine").unwrap().is_some());
}

#[test]
fn empty_and_unknown_symptoms_skip_classification() {
    let (pipeline, classifier, sink) = fixed_pipeline(vec![0.2; 5]);

    assert!(pipeline.infer(&symptoms(&[])).unwrap().is_empty());
    assert!(pipeline.infer(&symptoms(&["CHILLS", "not_a_symptom"])).unwrap().is_empty());
    assert_eq!(classifier.calls(), 0);
    assert!(sink.records().is_empty());
}

#[test]
fn form_values_are_split_and_trimmed() {
    let (pipeline, _, sink) = fixed_pipeline(vec![0.6, 0.3, 0.1, 0.0, 0.0]);

    let request = InferenceRequest::from_form(" chills , ,headache,");
    let records = pipeline.infer(&request).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(sink.records()[0].symptoms, vec!["chills", "headache"]);
}

#[test]
fn ties_rank_by_class_index() {
    let (pipeline, _, _) = fixed_pipeline(vec![0.1, 0.3, 0.3, 0.0, 0.3]);

    let first = pipeline.infer_symptoms(&["cough"]).unwrap();
    let second = pipeline.infer_symptoms(&["cough"]).unwrap();

    let names: Vec<_> = first.iter().map(|r| r.disease.as_str()).collect();
    assert_eq!(names, vec!["Common Cold", "Typhoid", "Migraine"]);
    assert_eq!(first, second);
}

#[test]
fn history_record_carries_request_and_results() {
    let (pipeline, _, sink) = fixed_pipeline(vec![0.6, 0.3, 0.1, 0.0, 0.0]);
    let request = symptoms(&["chills", "chills", "unknown"]).with_identity("user-7");

    let records = pipeline.infer(&request).unwrap();

    let history = sink.records();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].identity.as_deref(), Some("user-7"));
    assert_eq!(history[0].symptoms, request.symptoms);
    assert_eq!(history[0].ranked_diseases, vec!["Malaria", "Common Cold", "Typhoid"]);
    assert_eq!(history[0].results, records);
    assert!(!history[0].nonce.is_empty());
}

#[test]
fn history_nonces_are_unique_per_request() {
    let (pipeline, _, sink) = fixed_pipeline(vec![0.6, 0.3, 0.1, 0.0, 0.0]);
    pipeline.infer_symptoms(&["chills"]).unwrap();
    pipeline.infer_symptoms(&["chills"]).unwrap();
    let history = sink.records();
    assert_ne!(history[0].nonce, history[1].nonce);
}

#[test]
fn failing_history_sink_does_not_fail_inference() {
    let (pipeline, _, _) = fixed_pipeline(vec![0.6, 0.3, 0.1, 0.0, 0.0]);
    let pipeline = pipeline.with_history(Arc::new(FailingHistorySink));

    let records = pipeline.infer_symptoms(&["chills"]).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn runtime_persists_history_per_identity() {
    let runtime = runtime_with(Arc::new(ScriptedKnowledgeSource::new(article())));

    runtime
        .pipeline
        .infer(&symptoms(&["chills"]).with_identity("alice"))
        .unwrap();
    runtime
        .pipeline
        .infer(&symptoms(&["headache"]).with_identity("alice"))
        .unwrap();

    let history = runtime.storage.recent_history("alice", 10).unwrap();
    assert_eq!(history.len(), 2);
    assert!(runtime.storage.recent_history("bob", 10).unwrap().is_empty());
}

#[test]
fn legacy_cache_is_imported_at_startup() {
    let source = Arc::new(ScriptedKnowledgeSource::new(article()));
    let mut config = fixture_config();
    config.storage.legacy_cache_path =
        Some(fixture_path("artifacts/legacy_cache.json").display().to_string());
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let runtime = TriageRuntime::with_components(config, storage, source.clone()).unwrap();

    let records = runtime.pipeline.infer(&symptoms(&["headache"])).unwrap();

    assert_eq!(records[0].disease, "Migraine");
    assert!(records[0].description.starts_with("Migraine is a genetically influenced"));
    // Migraine and Malaria come from the legacy file; only Jaundice is fetched.
    assert_eq!(source.summary_calls(), 1);
}

#[test]
fn initialize_opens_file_storage_from_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = fixture_config();
    config.storage.db_path = dir.path().join("triage.db").display().to_string();

    let runtime = TriageRuntime::initialize(config).unwrap();

    assert_eq!(runtime.pipeline().labels().len(), 5);
    assert_eq!(runtime.pipeline().resolver().source_name(), "wikipedia");
    assert!(dir.path().join("triage.db").exists());
}

#[test]
fn mismatched_labels_abort_startup() {
    let dir = tempfile::TempDir::new().unwrap();
    let labels = dir.path().join("labels.json");
    std::fs::write(&labels, r#"{"labels":["Malaria","Common Cold","Typhoid","Jaundice"]}"#).unwrap();
    let mut config = fixture_config();
    config.classifier.labels_path = labels.display().to_string();

    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let result = TriageRuntime::with_components(
        config,
        storage,
        Arc::new(ScriptedKnowledgeSource::unreachable()),
    );

    assert!(matches!(
        result,
        Err(TriageError::ClassifierError(ClassifierError::ArtifactMismatch { .. }))
    ));
}

#[test]
fn missing_model_aborts_startup() {
    let mut config = fixture_config();
    config.classifier.model_path = "/nonexistent/model.json".to_string();
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let result = TriageRuntime::with_components(
        config,
        storage,
        Arc::new(ScriptedKnowledgeSource::unreachable()),
    );
    assert!(matches!(
        result,
        Err(TriageError::ClassifierError(ClassifierError::ArtifactLoad { .. }))
    ));
}

#[tokio::test]
async fn infer_async_matches_sync_result() {
    let (pipeline, _, _) = fixed_pipeline(vec![0.6, 0.3, 0.1, 0.0, 0.0]);
    let pipeline = Arc::new(pipeline);

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(pipeline.infer_async(symptoms(&["chills"])))
        })
        .collect();

    for task in tasks {
        let records = task.await.unwrap().unwrap();
        let names: Vec<_> = records.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, vec!["Malaria", "Common Cold", "Typhoid"]);
    }
}

#[tokio::test]
async fn infer_runs_directly_inside_a_runtime_over_file_storage() {
    let dir = tempfile::TempDir::new().unwrap();
    let storage = Arc::new(StorageEngine::open(&dir.path().join("triage.db")).unwrap());
    let source = Arc::new(ScriptedKnowledgeSource::new(article()));
    let runtime = TriageRuntime::with_components(fixture_config(), storage, source).unwrap();

    let first = runtime
        .pipeline
        .infer(&symptoms(&["chills"]).with_identity("alice"))
        .unwrap();
    let second = runtime.pipeline.infer(&symptoms(&["chills"])).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(runtime.storage.entry_count().unwrap(), 3);
    assert_eq!(runtime.storage.recent_history("alice", 10).unwrap().len(), 1);
}
