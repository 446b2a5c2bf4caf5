//! Data model shared by every stage of the pipeline.

mod degradation_event;
mod feature_vector;
mod history_record;
mod knowledge_document;
mod knowledge_entry;
mod prediction_record;
mod ranked_class;

pub use degradation_event::DegradationEvent;
pub use feature_vector::FeatureVector;
pub use history_record::PredictionHistoryRecord;
pub use knowledge_document::{DocumentSection, SourceSummary};
pub use knowledge_entry::{KnowledgeEntry, MAX_PRECAUTIONS};
pub use prediction_record::PredictionRecord;
pub use ranked_class::RankedClass;
