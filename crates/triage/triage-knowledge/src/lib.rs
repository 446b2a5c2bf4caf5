//! # triage-knowledge
//!
//! Turns a condition label into a [`KnowledgeEntry`](triage_core::KnowledgeEntry):
//! cache lookup, encyclopedia fetch, section scan, sentence extraction and
//! the tiered fallback when the source misbehaves.

pub mod cache;
pub mod deadline;
pub mod document;
pub mod extraction;
pub mod resolver;
pub mod sources;

pub use cache::{CacheHitTier, KnowledgeCacheCoordinator};
pub use extraction::extract_precautions;
pub use resolver::{KnowledgeResolver, Provenance, Resolution};
pub use sources::WikipediaSource;
