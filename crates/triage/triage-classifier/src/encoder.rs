//! Symptom set → fixed-order binary feature vector.

use std::sync::Arc;

use triage_core::models::FeatureVector;

use crate::schema::SymptomSchema;

/// Pure encoder over a shared, immutable schema.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: Arc<SymptomSchema>,
}

impl FeatureEncoder {
    pub fn new(schema: Arc<SymptomSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &SymptomSchema {
        &self.schema
    }

    /// Position `i` is 1 iff the schema's `i`-th identifier appears in `symptoms`.
    ///
    /// Unknown identifiers are ignored; duplicates have no extra effect.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.schema.len());
        for symptom in symptoms {
            if let Some(position) = self.schema.position(symptom.as_ref()) {
                vector.set(position);
            }
        }
        vector
    }

    /// Inputs that do not match any schema identifier.
    pub fn unknown<'a, S: AsRef<str>>(&self, symptoms: &'a [S]) -> Vec<&'a str> {
        symptoms
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !self.schema.contains(s))
            .collect()
    }
}

/// Split a comma-separated form value into trimmed, non-empty symptom names.
pub fn parse_symptom_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
