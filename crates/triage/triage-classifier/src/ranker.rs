//! Top-K selection over a probability vector.
//!
//! Ordering is by descending probability; exact ties go to the lower class
//! index, so identical inputs always rank identically.

use std::cmp::Ordering;

use triage_core::config::defaults::DEFAULT_TOP_K;
use triage_core::errors::{ClassifierError, TriageResult};
use triage_core::models::RankedClass;

use crate::labels::LabelIndex;

#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    top_k: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl Ranker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank `probabilities` (index-aligned with `labels`) and keep at most K.
    /// Fewer classes than K is not an error.
    pub fn rank(&self, probabilities: &[f64], labels: &LabelIndex) -> TriageResult<Vec<RankedClass>> {
        if probabilities.len() != labels.len() {
            return Err(ClassifierError::InferenceFailed {
                reason: format!(
                    "probability vector has {} entries, label mapping has {}",
                    probabilities.len(),
                    labels.len()
                ),
            }
            .into());
        }

        let sanitized: Vec<f64> = probabilities
            .iter()
            .map(|&p| if p.is_nan() { 0.0 } else { p })
            .collect();

        let mut order: Vec<usize> = (0..sanitized.len()).collect();
        order.sort_by(|&a, &b| compare_desc(sanitized[a], sanitized[b]).then(a.cmp(&b)));

        Ok(order
            .into_iter()
            .take(self.top_k)
            .filter_map(|index| {
                let label = labels.label(index)?;
                Some(RankedClass {
                    class_index: index,
                    label: label.to_string(),
                    probability: sanitized[index],
                    confidence: round_confidence(sanitized[index]),
                })
            })
            .collect())
    }
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Probability → percentage with two decimals, decimal round-half-up.
///
/// The scaled value is first snapped to 1e-6 so that binary representation
/// error cannot move a decimal `.xx5` tie below the midpoint
/// (`0.12345 * 10_000` is `1234.4999…` in `f64`).
pub fn round_confidence(probability: f64) -> f64 {
    let scaled = probability * 10_000.0;
    let snapped = (scaled * 1e6).round() / 1e6;
    snapped.round() / 100.0
}
