use serde::{Deserialize, Serialize};

/// Fixed-length binary feature vector, positionally aligned with a symptom schema.
///
/// Only 0/1 values can be represented: construction starts from all zeros and
/// positions are switched on with [`FeatureVector::set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    bits: Vec<u8>,
}

impl FeatureVector {
    /// All-zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self { bits: vec![0; len] }
    }

    /// Switch position `index` on. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = 1;
        }
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of positions set to 1.
    pub fn active_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// True when no position is set. Such a vector carries no clinical signal.
    pub fn is_all_zero(&self) -> bool {
        self.active_count() == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Indices of the positions set to 1, ascending.
    pub fn active_indices(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == 1)
            .map(|(i, _)| i)
            .collect()
    }

    /// Values as `f32`, the input type most model runtimes expect.
    pub fn to_f32(&self) -> Vec<f32> {
        self.bits.iter().map(|&b| f32::from(b)).collect()
    }
}
