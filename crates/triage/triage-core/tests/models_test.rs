use proptest::prelude::*;

use triage_core::constants::{self, DEFAULT_SYMPTOM_SCHEMA};
use triage_core::models::*;

#[test]
fn feature_vector_starts_all_zero() {
    let v = FeatureVector::zeros(4);
    assert_eq!(v.len(), 4);
    assert!(v.is_all_zero());
    assert_eq!(v.as_slice(), &[0, 0, 0, 0]);
}

#[test]
fn feature_vector_set_is_idempotent_and_bounded() {
    let mut v = FeatureVector::zeros(3);
    v.set(1);
    v.set(1);
    v.set(99);
    assert_eq!(v.as_slice(), &[0, 1, 0]);
    assert_eq!(v.active_count(), 1);
    assert_eq!(v.active_indices(), vec![1]);
    assert_eq!(v.to_f32(), vec![0.0, 1.0, 0.0]);
}

#[test]
fn knowledge_entry_well_formedness() {
    let one = KnowledgeEntry::new("d", vec!["p".into()]);
    assert!(one.is_well_formed());

    let none = KnowledgeEntry::new("d", vec![]);
    assert!(!none.is_well_formed());

    let six = KnowledgeEntry::new("d", (0..6).map(|i| i.to_string()).collect());
    assert!(!six.is_well_formed());
}

#[test]
fn prediction_record_assembles_from_ranked_class() {
    let ranked = RankedClass {
        class_index: 2,
        label: "Malaria".into(),
        probability: 0.6,
        confidence: 60.0,
    };
    let entry = KnowledgeEntry::new("A mosquito-borne disease.", vec!["Use nets.".into()]);
    let record = PredictionRecord::assemble(&ranked, entry);
    assert_eq!(record.disease, "Malaria");
    assert_eq!(record.confidence, 60.0);
    assert_eq!(record.precautions, vec!["Use nets."]);
}

#[test]
fn prediction_record_serializes_with_expected_keys() {
    let record = PredictionRecord {
        disease: "Flu".into(),
        confidence: 12.5,
        description: "d".into(),
        precautions: vec!["p".into()],
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["disease"], "Flu");
    assert_eq!(json["confidence"], 12.5);
    assert!(json["precautions"].is_array());
}

#[test]
fn builtin_schema_is_unique() {
    let mut seen = std::collections::HashSet::new();
    for s in DEFAULT_SYMPTOM_SCHEMA {
        assert!(seen.insert(s), "duplicate symptom {s}");
    }
    assert_eq!(seen.len(), 132);
}

#[test]
fn synthetic_description_mentions_label() {
    let d = constants::synthetic_description("Dengue");
    assert!(d.starts_with("Dengue "));
    assert!(d.contains("limited"));
}

proptest! {
    #[test]
    fn prop_feature_vector_is_binary(len in 0usize..64, sets in proptest::collection::vec(0usize..80, 0..20)) {
        let mut v = FeatureVector::zeros(len);
        for i in sets {
            v.set(i);
        }
        prop_assert_eq!(v.len(), len);
        prop_assert!(v.as_slice().iter().all(|&b| b == 0 || b == 1));
    }
}
