//! # triage-pipeline
//!
//! Composes the encoder, classifier, ranker and knowledge resolver into
//! `infer`, and bootstraps everything from a [`TriageConfig`](triage_core::TriageConfig).

pub mod engine;
pub mod runtime;
pub mod tracing_setup;

pub use engine::{DiagnosisPipeline, InferenceRequest};
pub use runtime::TriageRuntime;
