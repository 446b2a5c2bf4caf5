//! Knowledge source implementations.

mod wikipedia;

pub use wikipedia::WikipediaSource;
