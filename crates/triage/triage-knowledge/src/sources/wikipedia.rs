//! MediaWiki Action API client (Wikipedia by default).
//!
//! Three round-trips, all with `formatversion=2`:
//! 1. `list=search` resolves a free-text query to a canonical title, retrying
//!    once with the server's spelling suggestion when the first search is empty.
//! 2. `prop=extracts|pageprops` with `exintro` + `exsentences` gives the
//!    plain-text summary; a `disambiguation` page prop fails the lookup.
//! 3. `prop=extracts` with `exsectionformat=wiki` gives the full article,
//!    parsed into `== Heading ==` sections.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use triage_core::config::KnowledgeConfig;
use triage_core::errors::{KnowledgeError, KnowledgeResult};
use triage_core::models::{DocumentSection, SourceSummary};
use triage_core::traits::IKnowledgeSource;

use crate::document::parse_sections;

const SOURCE_NAME: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBlock>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

pub struct WikipediaSource {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl WikipediaSource {
    /// Build a client honouring the configured endpoint, user agent and
    /// per-request timeout. Must not be called from inside an async task.
    pub fn new(config: &KnowledgeConfig) -> KnowledgeResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.fetch_timeout_ms))
            .build()
            .map_err(|e| KnowledgeError::Unavailable {
                source_name: SOURCE_NAME.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout_ms: config.fetch_timeout_ms,
        })
    }

    fn call(&self, params: &[(&str, &str)]) -> KnowledgeResult<QueryBlock> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KnowledgeError::Unavailable {
                source_name: SOURCE_NAME.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response.text().map_err(|e| self.transport_error(e))?;
        parse_response(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> KnowledgeError {
        if e.is_timeout() {
            KnowledgeError::Timeout {
                stage: "http".to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            KnowledgeError::Unavailable {
                source_name: SOURCE_NAME.to_string(),
                reason: e.to_string(),
            }
        }
    }

    fn search(&self, query: &str) -> KnowledgeResult<(Option<String>, Option<String>)> {
        let block = self.call(&[
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", "1"),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ])?;
        Ok(search_result(block))
    }

    /// Canonical title for a free-text query.
    fn resolve_title(&self, query: &str) -> KnowledgeResult<String> {
        let (title, suggestion) = self.search(query)?;
        if let Some(title) = title {
            return Ok(title);
        }
        if let Some(suggestion) = suggestion {
            debug!(query, suggestion = %suggestion, "retrying search with suggestion");
            if let (Some(title), _) = self.search(&suggestion)? {
                return Ok(title);
            }
        }
        Err(KnowledgeError::NotFound {
            query: query.to_string(),
        })
    }
}

impl IKnowledgeSource for WikipediaSource {
    fn fetch_summary(&self, query: &str, max_sentences: usize) -> KnowledgeResult<SourceSummary> {
        let title = self.resolve_title(query)?;
        let sentences = max_sentences.max(1).to_string();
        let block = self.call(&[
            ("prop", "extracts|pageprops"),
            ("ppprop", "disambiguation"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("exsentences", sentences.as_str()),
            ("redirects", "1"),
            ("titles", title.as_str()),
        ])?;
        summary_from(block, query)
    }

    fn fetch_sections(&self, title: &str) -> KnowledgeResult<Vec<DocumentSection>> {
        let block = self.call(&[
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("exsectionformat", "wiki"),
            ("redirects", "1"),
            ("titles", title),
        ])?;
        let page = first_page(block, title)?;
        Ok(parse_sections(page.extract.as_deref().unwrap_or_default()))
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

fn parse_response(body: &str) -> KnowledgeResult<QueryBlock> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| KnowledgeError::MalformedResponse {
            reason: e.to_string(),
        })?;
    if let Some(error) = parsed.error {
        return Err(KnowledgeError::Unavailable {
            source_name: SOURCE_NAME.to_string(),
            reason: format!("{}: {}", error.code, error.info),
        });
    }
    Ok(parsed.query.unwrap_or_default())
}

fn search_result(block: QueryBlock) -> (Option<String>, Option<String>) {
    let title = block.search.into_iter().next().map(|hit| hit.title);
    let suggestion = block
        .searchinfo
        .and_then(|info| info.suggestion)
        .filter(|s| !s.is_empty());
    (title, suggestion)
}

fn first_page(block: QueryBlock, query: &str) -> KnowledgeResult<Page> {
    match block.pages.into_iter().next() {
        Some(page) if !page.missing => Ok(page),
        _ => Err(KnowledgeError::NotFound {
            query: query.to_string(),
        }),
    }
}

fn summary_from(block: QueryBlock, query: &str) -> KnowledgeResult<SourceSummary> {
    let page = first_page(block, query)?;
    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some())
    {
        return Err(KnowledgeError::Ambiguous {
            query: query.to_string(),
        });
    }
    let text = page.extract.unwrap_or_default().trim().to_string();
    if text.is_empty() {
        return Err(KnowledgeError::NotFound {
            query: query.to_string(),
        });
    }
    Ok(SourceSummary {
        title: page.title,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_takes_first_hit_and_suggestion() {
        let block = parse_response(
            r#"{"query":{"searchinfo":{"suggestion":"malaria"},"search":[{"ns":0,"title":"Malaria"}]}}"#,
        )
        .unwrap();
        assert_eq!(
            search_result(block),
            (Some("Malaria".to_string()), Some("malaria".to_string()))
        );
    }

    #[test]
    fn empty_search_has_no_title() {
        let block = parse_response(r#"{"query":{"searchinfo":{"totalhits":0},"search":[]}}"#).unwrap();
        assert_eq!(search_result(block), (None, None));
    }

    #[test]
    fn summary_extract_is_trimmed() {
        let block = parse_response(
            r#"{"query":{"pages":[{"pageid":1,"title":"Malaria","extract":"Malaria is a disease. It spreads.\n"}]}}"#,
        )
        .unwrap();
        let summary = summary_from(block, "Malaria (medical condition)").unwrap();
        assert_eq!(summary.title, "Malaria");
        assert_eq!(summary.text, "Malaria is a disease. It spreads.");
    }

    #[test]
    fn disambiguation_page_is_ambiguous() {
        let block = parse_response(
            r#"{"query":{"pages":[{"title":"Cold","extract":"Cold may refer to:","pageprops":{"disambiguation":""}}]}}"#,
        )
        .unwrap();
        assert!(matches!(
            summary_from(block, "Cold"),
            Err(KnowledgeError::Ambiguous { .. })
        ));
    }

    #[test]
    fn missing_page_is_not_found() {
        let block =
            parse_response(r#"{"query":{"pages":[{"title":"Nope","missing":true}]}}"#).unwrap();
        assert!(matches!(
            summary_from(block, "Nope"),
            Err(KnowledgeError::NotFound { .. })
        ));
    }

    #[test]
    fn api_error_is_unavailable() {
        let err = parse_response(r#"{"error":{"code":"maxlag","info":"Waiting"}}"#).unwrap_err();
        assert!(err.to_string().contains("maxlag"));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_response("<html>"),
            Err(KnowledgeError::MalformedResponse { .. })
        ));
    }
}
