//! Plain-text article parsing into sections.
//!
//! Headings are lines of the form `== Title ==` (any depth of two or more,
//! balanced). A section's content runs from its heading to the next heading
//! of any level, so a parent section does not include its subsections.

use std::sync::LazyLock;

use regex::Regex;

use triage_core::models::DocumentSection;

static HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(={2,})\s*(.*?)\s*(={2,})$").ok());

fn parse_heading(line: &str) -> Option<(usize, String)> {
    let caps = HEADING.as_ref()?.captures(line.trim())?;
    let open = caps.get(1)?.as_str().len();
    let close = caps.get(3)?.as_str().len();
    let title = caps.get(2)?.as_str();
    if open != close || title.is_empty() {
        return None;
    }
    Some((open, title.to_string()))
}

/// Split an article extract into its titled sections. Text before the first
/// heading (the lead) is not a section.
pub fn parse_sections(text: &str) -> Vec<DocumentSection> {
    let mut sections = Vec::new();
    let mut current: Option<(usize, String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((level, title)) = parse_heading(line) {
            if let Some(done) = current.take() {
                sections.push(finish(done));
            }
            current = Some((level, title, Vec::new()));
        } else if let Some((_, _, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some(done) = current {
        sections.push(finish(done));
    }
    sections
}

fn finish((level, title, body): (usize, String, Vec<&str>)) -> DocumentSection {
    DocumentSection {
        title,
        level,
        content: body.join("\n").trim().to_string(),
    }
}

/// Concatenate the content of every section whose title contains one of
/// `keywords` (case-insensitive). Empty sections contribute nothing.
pub fn collect_matching(sections: &[DocumentSection], keywords: &[String]) -> String {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut buffer = String::new();
    for section in sections {
        let title = section.title.to_lowercase();
        if keywords.iter().any(|k| title.contains(k.as_str())) && !section.content.is_empty() {
            buffer.push_str(&section.content);
            buffer.push(' ');
        }
    }
    buffer
}
