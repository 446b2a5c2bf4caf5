//! Precaution sentence extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

use triage_core::constants::DEFAULT_PRECAUTION;

static SENTENCE_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\.\s+").ok());
static CITATION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[\d+\]").ok());

/// Split `text` on `". "` boundaries and keep, in order, up to `max` cleaned
/// fragments strictly longer than `min_chars` characters. A fragment is
/// trimmed, stripped of citation markers, and only then measured, so any
/// whitespace a marker leaves behind counts toward its length. Each kept
/// fragment ends with a period. Yields the single default precaution when
/// nothing qualifies.
pub fn extract_precautions(text: &str, max: usize, min_chars: usize) -> Vec<String> {
    let fragments: Vec<&str> = match SENTENCE_BREAK.as_ref() {
        Some(re) => re.split(text).collect(),
        None => vec![text],
    };

    let mut precautions = Vec::new();
    for fragment in fragments {
        if precautions.len() >= max {
            break;
        }
        let cleaned = strip_citations(fragment.trim());
        if cleaned.chars().count() <= min_chars {
            continue;
        }
        let mut sentence = cleaned.trim().to_string();
        if !sentence.ends_with('.') {
            sentence.push('.');
        }
        precautions.push(sentence);
    }

    if precautions.is_empty() {
        precautions.push(DEFAULT_PRECAUTION.to_string());
    }
    precautions
}

/// Remove `[n]` citation markers.
pub fn strip_citations(text: &str) -> String {
    match CITATION.as_ref() {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}
