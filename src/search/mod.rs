//! Web search tool with relevance filtering.
//!
//! Provides a trait-based interface for search providers and the
//! `search_tool` implementation that filters and formats raw results.

mod duckduckgo;

pub use duckduckgo::DuckDuckGo;

use crate::config::{SafeSearch, SearchSettings};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Sentinel answer returned when the relevance filter leaves nothing.
pub const NO_RESULTS_SENTINEL: &str = "No relevant results found.";

/// Domain marker excluded by the relevance filter.
const LOW_VALUE_DOMAIN: &str = "current.com";

/// URL prefixes excluded by the relevance filter (app-store links).
const APP_STORE_PREFIXES: [&str; 2] = ["https://apps.apple.com", "https://play.google.com"];

/// Title phrase excluded by the relevance filter (generic list pages).
const LIST_PAGE_MARKER: &str = "list of";

/// One result from the search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title.
    pub title: String,
    /// Snippet text.
    pub body: String,
    /// Page URL.
    pub href: String,
}

/// Query parameters forwarded to the provider.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub max_results: usize,
}

/// Trait for web search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search and return results in provider ranking order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}

/// Output of the search tool: the query as executed plus formatted answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub query: String,
    pub answers: Vec<String>,
}

impl ToolResult {
    /// Whether this result carries only the no-results sentinel.
    pub fn is_empty_sentinel(&self) -> bool {
        self.answers.len() == 1 && self.answers[0] == NO_RESULTS_SENTINEL
    }
}

/// Keep a result only if it passes the relevance heuristics.
///
/// Excludes the known low-value domain, app-store links, and generic
/// "list of" pages. Comparisons are case-insensitive on both fields.
fn is_relevant(result: &SearchResult) -> bool {
    let href = result.href.to_lowercase();

    !href.contains(LOW_VALUE_DOMAIN)
        && !APP_STORE_PREFIXES.iter().any(|p| result.href.starts_with(p))
        && !result.title.to_lowercase().contains(LIST_PAGE_MARKER)
}

/// Apply the relevance filter, preserving provider order.
pub fn filter_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.into_iter().filter(is_relevant).collect()
}

/// Format one surviving result as a display answer.
fn format_answer(result: &SearchResult) -> String {
    format!(
        "{} — {} (Source: {})",
        result.title, result.body, result.href
    )
}

/// The `search_tool` implementation: contextual web search with relevance
/// filtering and a fixed answer cap.
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
    settings: SearchSettings,
}

impl SearchTool {
    /// Create a new search tool over the given provider.
    pub fn new(provider: Arc<dyn SearchProvider>, settings: SearchSettings) -> Self {
        Self { provider, settings }
    }

    /// Run a query and return filtered, formatted answers.
    ///
    /// Provider failures are fatal to the current question; an empty
    /// filtered set is not, and yields the sentinel answer instead.
    pub async fn run(&self, query: &str) -> Result<ToolResult> {
        let request = SearchRequest {
            query: query.to_string(),
            region: self.settings.region.clone(),
            safesearch: self.settings.safesearch,
            max_results: self.settings.max_results,
        };

        info!("Searching: {}", query);
        let raw = self.provider.search(&request).await?;
        debug!("Provider returned {} results", raw.len());

        let survivors = filter_results(raw);

        if survivors.is_empty() {
            return Ok(ToolResult {
                query: query.to_string(),
                answers: vec![NO_RESULTS_SENTINEL.to_string()],
            });
        }

        let answers = survivors
            .iter()
            .take(self.settings.max_answers)
            .map(format_answer)
            .collect();

        Ok(ToolResult {
            query: query.to_string(),
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchSettings;

    fn result(title: &str, body: &str, href: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            body: body.to_string(),
            href: href.to_string(),
        }
    }

    /// Provider that replays a fixed result set.
    struct FixedProvider {
        results: Vec<SearchResult>,
    }

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }
    }

    fn tool(results: Vec<SearchResult>) -> SearchTool {
        SearchTool::new(
            Arc::new(FixedProvider { results }),
            SearchSettings::default(),
        )
    }

    #[test]
    fn test_filter_excludes_low_value_domain() {
        let results = vec![
            result("a", "b", "https://example.com/a"),
            result("a", "b", "https://www.CURRENT.com/rates"),
        ];
        let survivors = filter_results(results);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].href, "https://example.com/a");
    }

    #[test]
    fn test_filter_excludes_app_store_prefixes() {
        let results = vec![
            result("a", "b", "https://apps.apple.com/us/app/weather"),
            result("a", "b", "https://play.google.com/store/apps"),
            result("a", "b", "https://example.com/play.google.com"),
        ];
        let survivors = filter_results(results);
        // Prefix match only: the third URL merely mentions the store host.
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].href, "https://example.com/play.google.com");
    }

    #[test]
    fn test_filter_excludes_list_pages_case_insensitively() {
        let results = vec![
            result("List of prime ministers", "b", "https://example.com/1"),
            result("A LIST OF things", "b", "https://example.com/2"),
            result("Prime minister profile", "b", "https://example.com/3"),
        ];
        let survivors = filter_results(results);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].href, "https://example.com/3");
    }

    #[test]
    fn test_filter_preserves_order() {
        let results = vec![
            result("first", "b", "https://example.com/1"),
            result("List of stuff", "b", "https://example.com/skip"),
            result("second", "b", "https://example.com/2"),
            result("third", "b", "https://example.com/3"),
        ];
        let survivors = filter_results(results);
        let titles: Vec<&str> = survivors.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_format_answer() {
        let r = result(
            "Lahore Weather",
            "Sunny, 34°C",
            "https://example.com/weather",
        );
        assert_eq!(
            format_answer(&r),
            "Lahore Weather — Sunny, 34°C (Source: https://example.com/weather)"
        );
    }

    #[tokio::test]
    async fn test_run_caps_answers_at_three() {
        // Five results, two of which are list pages: answers come only from
        // the three survivors, in original order.
        let tool = tool(vec![
            result("one", "b", "https://example.com/1"),
            result("List of one", "b", "https://example.com/x"),
            result("two", "b", "https://example.com/2"),
            result("List of two", "b", "https://example.com/y"),
            result("three", "b", "https://example.com/3"),
        ]);

        let out = tool.run("q").await.unwrap();
        assert_eq!(out.answers.len(), 3);
        assert!(out.answers[0].starts_with("one — "));
        assert!(out.answers[1].starts_with("two — "));
        assert!(out.answers[2].starts_with("three — "));
    }

    #[tokio::test]
    async fn test_run_empty_provider_yields_sentinel() {
        let tool = tool(vec![]);
        let out = tool.run("q").await.unwrap();
        assert_eq!(out.answers, vec![NO_RESULTS_SENTINEL.to_string()]);
        assert!(out.is_empty_sentinel());
    }

    #[tokio::test]
    async fn test_run_all_filtered_yields_sentinel() {
        let tool = tool(vec![
            result("List of everything", "b", "https://example.com/1"),
            result("x", "b", "https://apps.apple.com/app"),
        ]);
        let out = tool.run("q").await.unwrap();
        assert!(out.is_empty_sentinel());
    }

    #[tokio::test]
    async fn test_run_is_idempotent_over_fixed_provider() {
        let tool = tool(vec![
            result("one", "b", "https://example.com/1"),
            result("two", "b", "https://example.com/2"),
        ]);

        let first = tool.run("same query").await.unwrap();
        let second = tool.run("same query").await.unwrap();
        assert_eq!(first, second);
    }
}
