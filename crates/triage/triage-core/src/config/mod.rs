//! Configuration loaded from TOML. Every section is optional; missing keys
//! fall back to [`defaults`].

mod classifier_config;
pub mod defaults;
mod knowledge_config;
mod observability_config;
mod ranking_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use classifier_config::ClassifierConfig;
pub use knowledge_config::KnowledgeConfig;
pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use storage_config::StorageConfig;

use crate::errors::{TriageError, TriageResult};

/// Root configuration for the whole pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub classifier: ClassifierConfig,
    pub ranking: RankingConfig,
    pub knowledge: KnowledgeConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl TriageConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| TriageError::IoError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw).map_err(|e| TriageError::ConfigError(e.to_string()))
    }
}
