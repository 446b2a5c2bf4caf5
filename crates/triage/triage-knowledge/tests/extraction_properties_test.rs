//! Property tests for precaution extraction and section collection.

use proptest::prelude::*;

use triage_core::constants::DEFAULT_PRECAUTION;
use triage_knowledge::document::{collect_matching, parse_sections};
use triage_knowledge::extract_precautions;

// Markers sit directly after a letter, so stripping them leaves no
// whitespace for the final trim to remove.
fn sentence() -> impl Strategy<Value = String> {
    "([A-Za-z ]{0,60}[A-Za-z](\\[[0-9]{1,3}\\])?)?"
}

proptest! {
    #[test]
    fn output_is_bounded_and_well_formed(parts in prop::collection::vec(sentence(), 0..12)) {
        let text = parts.join(". ");
        let out = extract_precautions(&text, 5, 30);

        prop_assert!(!out.is_empty());
        prop_assert!(out.len() <= 5);
        for p in &out {
            prop_assert!(p.ends_with('.'));
            prop_assert!(!p.contains('['));
            prop_assert!(p == DEFAULT_PRECAUTION || p.chars().count() > 30);
        }
    }

    #[test]
    fn extraction_is_deterministic(parts in prop::collection::vec(sentence(), 0..8)) {
        let text = parts.join(". ");
        prop_assert_eq!(extract_precautions(&text, 5, 30), extract_precautions(&text, 5, 30));
    }

    #[test]
    fn every_heading_becomes_a_section(titles in prop::collection::vec("[A-Za-z][A-Za-z ]{0,20}[A-Za-z]", 0..6)) {
        let text: String = titles
            .iter()
            .map(|t| format!("== {t} ==\nbody of {t}\n"))
            .collect();
        let sections = parse_sections(&text);
        prop_assert_eq!(sections.len(), titles.len());
        for (section, title) in sections.iter().zip(&titles) {
            prop_assert_eq!(&section.title, title);
            prop_assert_eq!(&section.content, &format!("body of {title}"));
        }
    }
}

#[test]
fn unmatched_keywords_collect_nothing() {
    let sections = parse_sections("== History ==\nOld.\n== Epidemiology ==\nCommon.\n");
    assert!(collect_matching(&sections, &["treatment".to_string()]).is_empty());
}
