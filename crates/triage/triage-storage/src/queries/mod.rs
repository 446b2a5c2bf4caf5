//! Raw SQL operations. Each takes a borrowed connection; locking and
//! connection selection belong to the engine.

pub mod history_ops;
pub mod knowledge_ops;
