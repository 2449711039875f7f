use std::time::Duration;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, ExamProfile};

const MAX_RESULTS: usize = 3;
const NO_SNIPPET: &str = "No snippet available";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search provider error: {0}")]
    Provider(String),

    #[error("Search API key or engine id is not configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub query: String,
    pub sub_objective: Option<String>,
}

/// Link and snippet shown alongside answer feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocReference {
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub relevance: f64,
}

/// Finds official documentation for a question's topic. Failures are
/// absorbed: callers only ever see a reference or nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentationLookup: Send + Sync {
    async fn lookup(&self, query: &LookupQuery) -> Option<DocReference>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    snippet: Option<String>,
}

/// Scores a search hit against the query, the topic and the sub-objective.
/// Mentions of the exam code or program name are worth 2, every query term
/// found in the title 1 and in the snippet 0.5.
pub fn relevance_score(
    exam_pattern: Option<&Regex>,
    title: &str,
    snippet: &str,
    query: &str,
    topic: Option<&str>,
    sub_objective: Option<&str>,
) -> f64 {
    let mut score = 0.0;

    let combined = format!("{}{}", title, snippet);
    if exam_pattern.is_some_and(|pattern| pattern.is_match(&combined)) {
        score += 2.0;
    }

    let title = title.to_lowercase();
    let snippet = snippet.to_lowercase();
    for text in [Some(query), topic, sub_objective].into_iter().flatten() {
        for term in text.to_lowercase().split_whitespace() {
            if title.contains(term) {
                score += 1.0;
            }
            if snippet.contains(term) {
                score += 0.5;
            }
        }
    }

    score
}

fn exam_pattern(exam: &ExamProfile) -> Option<Regex> {
    let pattern = format!(
        "{}|{}",
        regex::escape(&exam.exam_code),
        regex::escape(&exam.program_name)
    );
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::warn!("Could not build exam relevance pattern: {}", e);
            None
        }
    }
}

/// Searches a Custom Search compatible JSON API restricted to the exam's
/// documentation site.
pub struct WebDocumentationLookup {
    client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    engine_id: String,
    exam: ExamProfile,
    exam_pattern: Option<Regex>,
    timeout: Duration,
}

impl WebDocumentationLookup {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.search_api_url.clone(),
            api_key: config.search_api_key.clone(),
            engine_id: config.search_engine_id.clone(),
            exam: config.exam.clone(),
            exam_pattern: exam_pattern(&config.exam),
            timeout: config.lookup_timeout(),
        }
    }

    fn search_terms(&self, query: &LookupQuery) -> String {
        let mut terms = format!(
            "site:{} {} {} {} {}",
            self.exam.docs_site,
            query.query,
            self.exam.exam_code,
            self.exam.program_name,
            query.query
        );
        if let Some(sub_objective) = &query.sub_objective {
            terms.push(' ');
            terms.push_str(sub_objective);
        }
        terms
    }

    /// Turns raw search hits into ranked results: off-site links are
    /// dropped and at most three of the best-scoring hits are kept.
    fn rank(&self, items: Vec<SearchItem>, query: &LookupQuery) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = items
            .into_iter()
            .filter(|item| !item.link.is_empty() && item.link.contains(&self.exam.docs_site))
            .map(|item| {
                let snippet = item
                    .snippet
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| NO_SNIPPET.to_string());
                let relevance = relevance_score(
                    self.exam_pattern.as_ref(),
                    &item.title,
                    &snippet,
                    &query.query,
                    Some(&query.query),
                    query.sub_objective.as_deref(),
                );
                SearchResult {
                    title: item.title,
                    link: item.link,
                    snippet,
                    relevance,
                }
            })
            .collect();

        results.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        results.truncate(MAX_RESULTS);
        results
    }

    pub async fn search(&self, query: &LookupQuery) -> Result<Vec<SearchResult>, LookupError> {
        let api_key = self.api_key.expose_secret();
        if api_key.trim().is_empty() || self.engine_id.trim().is_empty() {
            return Err(LookupError::NotConfigured);
        }

        let terms = self.search_terms(query);
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("key", api_key),
                ("cx", self.engine_id.as_str()),
                ("q", terms.as_str()),
                ("num", "10"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(512).collect();
            return Err(LookupError::Provider(format!("http {}: {}", status, excerpt)));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(self.rank(parsed.items, query))
    }
}

#[async_trait]
impl DocumentationLookup for WebDocumentationLookup {
    async fn lookup(&self, query: &LookupQuery) -> Option<DocReference> {
        let results = match tokio::time::timeout(self.timeout, self.search(query)).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                log::error!("Documentation search failed for '{}': {}", query.query, e);
                return None;
            }
            Err(_) => {
                log::error!(
                    "Documentation search for '{}' timed out after {:?}",
                    query.query,
                    self.timeout
                );
                return None;
            }
        };

        match results.into_iter().next() {
            Some(best) => Some(DocReference {
                link: best.link,
                snippet: best.snippet,
            }),
            None => {
                log::warn!("No official documentation found for '{}'", query.query);
                None
            }
        }
    }
}
