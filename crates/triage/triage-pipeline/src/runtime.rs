//! TriageRuntime: owns every subsystem and wires the pipeline from config.
//!
//! Startup is fail-fast: artifact or storage problems abort `initialize`
//! so a misconfigured deployment never serves requests.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use triage_classifier::{ArtifactBundle, Ranker};
use triage_core::config::TriageConfig;
use triage_core::errors::TriageResult;
use triage_core::traits::IKnowledgeSource;
use triage_knowledge::{KnowledgeCacheCoordinator, KnowledgeResolver, WikipediaSource};
use triage_storage::StorageEngine;

use crate::engine::DiagnosisPipeline;

pub struct TriageRuntime {
    pub config: TriageConfig,
    pub storage: Arc<StorageEngine>,
    pub pipeline: Arc<DiagnosisPipeline>,
}

impl TriageRuntime {
    /// Load artifacts, open storage, and connect to the configured
    /// encyclopedia. Must run outside an async context.
    pub fn initialize(config: TriageConfig) -> TriageResult<Self> {
        let bundle = ArtifactBundle::load(&config.classifier)?;
        let source = Arc::new(WikipediaSource::new(&config.knowledge)?);
        let storage = Arc::new(StorageEngine::open_with_config(
            Path::new(&config.storage.db_path),
            &config.storage,
        )?);
        Self::assemble(config, bundle, storage, source)
    }

    /// Like [`Self::initialize`] with a caller-supplied knowledge source and
    /// storage engine.
    pub fn with_components(
        config: TriageConfig,
        storage: Arc<StorageEngine>,
        source: Arc<dyn IKnowledgeSource>,
    ) -> TriageResult<Self> {
        let bundle = ArtifactBundle::load(&config.classifier)?;
        Self::assemble(config, bundle, storage, source)
    }

    fn assemble(
        config: TriageConfig,
        bundle: ArtifactBundle,
        storage: Arc<StorageEngine>,
        source: Arc<dyn IKnowledgeSource>,
    ) -> TriageResult<Self> {
        if let Some(legacy) = &config.storage.legacy_cache_path {
            storage.import_legacy_json(Path::new(legacy))?;
        }

        let cache = Arc::new(KnowledgeCacheCoordinator::new(
            storage.clone(),
            config.storage.l1_cache_size,
        ));
        let resolver = Arc::new(KnowledgeResolver::new(
            cache,
            source,
            config.knowledge.clone(),
        ));
        let pipeline = DiagnosisPipeline::new(bundle, Ranker::new(config.ranking.top_k), resolver)
            .with_history(storage.clone());

        info!(
            labels = pipeline.labels().len(),
            top_k = config.ranking.top_k,
            knowledge_source = pipeline.resolver().source_name(),
            "triage runtime initialized"
        );

        Ok(Self {
            config,
            storage,
            pipeline: Arc::new(pipeline),
        })
    }

    pub fn pipeline(&self) -> Arc<DiagnosisPipeline> {
        Arc::clone(&self.pipeline)
    }
}
