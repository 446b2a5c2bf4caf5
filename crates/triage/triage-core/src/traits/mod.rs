//! Seams between pipeline stages. Every trait is object-safe and `Send + Sync`
//! so implementations can be shared behind `Arc` across request threads.

mod classifier;
mod history_sink;
mod knowledge_cache;
mod knowledge_source;

pub use classifier::IProbabilisticClassifier;
pub use history_sink::IHistorySink;
pub use knowledge_cache::IKnowledgeCache;
pub use knowledge_source::IKnowledgeSource;
