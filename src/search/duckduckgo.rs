//! DuckDuckGo search provider.
//!
//! Talks to the HTML endpoint (`html.duckduckgo.com`), which needs no API
//! key. Results are extracted with regexes over the result anchors and
//! snippets, and redirect links are unwrapped to the target URL.

use super::{SearchProvider, SearchRequest, SearchResult};
use crate::config::SafeSearch;
use crate::error::{Result, SvarError};
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;
use tracing::debug;
use url::Url;

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) svar/0.1";

/// DuckDuckGo HTML-endpoint client.
///
/// Holds one `reqwest::Client` reused across queries.
pub struct DuckDuckGo {
    http: reqwest::Client,
    result_re: Regex,
    snippet_re: Regex,
    tag_re: Regex,
}

impl DuckDuckGo {
    /// Create a new provider with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            result_re: Regex::new(
                r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#,
            )
            .expect("invalid result regex"),
            snippet_re: Regex::new(
                r#"(?s)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#,
            )
            .expect("invalid snippet regex"),
            tag_re: Regex::new(r"<[^>]+>").expect("invalid tag regex"),
        }
    }

    /// Extract results from a page of DuckDuckGo HTML.
    ///
    /// Each result anchor is paired with the snippet found between it and
    /// the next anchor, so a result without a snippet gets an empty body
    /// instead of stealing the next result's.
    fn parse_page(&self, html: &str, max_results: usize) -> Vec<SearchResult> {
        let anchors: Vec<regex::Captures<'_>> = self
            .result_re
            .captures_iter(html)
            .take(max_results)
            .collect();

        anchors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let block_start = c.get(0).map_or(0, |m| m.end());
                let block_end = anchors
                    .get(i + 1)
                    .and_then(|n| n.get(0))
                    .map_or(html.len(), |m| m.start());

                let body = self
                    .snippet_re
                    .captures(&html[block_start..block_end])
                    .map(|s| self.clean_text(&s[1]))
                    .unwrap_or_default();

                SearchResult {
                    href: resolve_redirect(&decode_entities(&c[1])),
                    title: self.clean_text(&c[2]),
                    body,
                }
            })
            .collect()
    }

    /// Strip markup and decode entities from an HTML fragment.
    fn clean_text(&self, fragment: &str) -> String {
        let stripped = self.tag_re.replace_all(fragment, "");
        decode_entities(stripped.trim())
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let form = [
            ("q", request.query.as_str()),
            ("kl", request.region.as_str()),
            ("kp", safesearch_param(request.safesearch)),
        ];

        let response = self
            .http
            .post(ENDPOINT)
            .form(&form)
            .send()
            .await
            .map_err(|e| SvarError::Search(e.to_string()))?
            .error_for_status()
            .map_err(|e| SvarError::Search(e.to_string()))?;

        let html = response
            .text()
            .await
            .map_err(|e| SvarError::Search(e.to_string()))?;

        let results = self.parse_page(&html, request.max_results);
        debug!("Parsed {} results from provider page", results.len());

        Ok(results)
    }
}

/// Map the safe-search level to DuckDuckGo's `kp` parameter.
fn safesearch_param(level: SafeSearch) -> &'static str {
    match level {
        SafeSearch::Strict => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

/// Unwrap a DuckDuckGo redirect link (`/l/?uddg=<target>`) to its target.
///
/// Links that are not redirects pass through unchanged.
fn resolve_redirect(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        href.to_string()
    };

    if let Ok(parsed) = Url::parse(&absolute) {
        if parsed.path() == "/l/" {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }
    }

    absolute
}

/// Decode the handful of HTML entities DuckDuckGo emits in titles/snippets.
///
/// `&amp;` is decoded last so pre-escaped text like `&amp;lt;` yields the
/// literal `&lt;` rather than double-decoding to `<`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <div class="result results_links results_links_deep web-result">
            <h2 class="result__title">
                <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fweather&amp;rut=abc">Lahore <b>Weather</b> Today</a>
            </h2>
            <a class="result__snippet" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fweather&amp;rut=abc">Sunny with a high of <b>34</b>&#x27;C</a>
        </div>
        <div class="result">
            <h2 class="result__title">
                <a rel="nofollow" class="result__a" href="https://example.org/direct">Direct link</a>
            </h2>
            <a class="result__snippet" href="https://example.org/direct">Plain snippet</a>
        </div>
    "#;

    #[test]
    fn test_parse_page() {
        let ddg = DuckDuckGo::default();
        let results = ddg.parse_page(SAMPLE_PAGE, 10);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Lahore Weather Today");
        assert_eq!(results[0].href, "https://example.com/weather");
        assert_eq!(results[0].body, "Sunny with a high of 34'C");
        assert_eq!(results[1].href, "https://example.org/direct");
        assert_eq!(results[1].body, "Plain snippet");
    }

    #[test]
    fn test_parse_page_respects_max_results() {
        let ddg = DuckDuckGo::default();
        let results = ddg.parse_page(SAMPLE_PAGE, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_resolve_redirect() {
        assert_eq!(
            resolve_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%20b&rut=x"),
            "https://example.com/a b"
        );
        assert_eq!(
            resolve_redirect("https://example.org/page"),
            "https://example.org/page"
        );
    }

    #[test]
    fn test_parse_page_result_without_snippet_keeps_alignment() {
        // The first result has no snippet anchor; the second result's
        // snippet must not shift onto it.
        let page = r#"
            <div class="result">
                <h2 class="result__title">
                    <a rel="nofollow" class="result__a" href="https://example.com/bare">Bare result</a>
                </h2>
            </div>
            <div class="result">
                <h2 class="result__title">
                    <a rel="nofollow" class="result__a" href="https://example.com/full">Full result</a>
                </h2>
                <a class="result__snippet" href="https://example.com/full">Only snippet on the page</a>
            </div>
        "#;

        let ddg = DuckDuckGo::default();
        let results = ddg.parse_page(page, 10);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Bare result");
        assert_eq!(results[0].body, "");
        assert_eq!(results[1].title, "Full result");
        assert_eq!(results[1].body, "Only snippet on the page");
    }

    #[test]
    fn test_decode_entities_decodes_ampersand_last() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        // Pre-escaped entities decode exactly once.
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
        assert_eq!(decode_entities("&lt;b&gt; &quot;x&quot;"), "<b> \"x\"");
    }

    #[test]
    fn test_safesearch_param() {
        assert_eq!(safesearch_param(SafeSearch::Strict), "1");
        assert_eq!(safesearch_param(SafeSearch::Moderate), "-1");
        assert_eq!(safesearch_param(SafeSearch::Off), "-2");
    }
}
