//! Fuzzy matching implementation.
//!
//! Uses SkimMatcherV2 for high-performance fuzzy matching with scoring.

use std::sync::OnceLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher as FuzzyMatcherTrait;

use crate::stream::StreamRecord;

/// Global matcher instance for performance.
/// Using OnceLock to initialize once and reuse across calls.
static GLOBAL_MATCHER: OnceLock<SkimMatcherV2> = OnceLock::new();

/// Get the global matcher instance.
fn global_matcher() -> &'static SkimMatcherV2 {
    GLOBAL_MATCHER.get_or_init(SkimMatcherV2::default)
}

/// Fuzzy matcher for stream filtering.
pub struct FuzzyMatcher {
    matcher: SkimMatcherV2,
    case_sensitive: bool,
    search_urls: bool,
}

impl FuzzyMatcher {
    /// Create a new fuzzy matcher.
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
            case_sensitive: false,
            search_urls: true,
        }
    }

    /// Set case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set whether to search in URLs.
    pub fn search_urls(mut self, search_urls: bool) -> Self {
        self.search_urls = search_urls;
        self
    }

    /// Match a stream against a query.
    ///
    /// Returns a score if the stream matches, or None if it doesn't.
    /// URL matches score half of name matches.
    pub fn match_stream(&self, stream: &StreamRecord, query: &str) -> Option<i64> {
        if query.is_empty() {
            return Some(0);
        }

        let query = if self.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };

        let name = if self.case_sensitive {
            stream.name.clone()
        } else {
            stream.name.to_lowercase()
        };

        if let Some(score) = self.matcher.fuzzy_match(&name, &query) {
            return Some(score);
        }

        if self.search_urls {
            let url = if self.case_sensitive {
                stream.url.clone()
            } else {
                stream.url.to_lowercase()
            };

            if let Some(score) = self.matcher.fuzzy_match(&url, &query) {
                return Some(score / 2);
            }
        }

        None
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter streams based on a query.
///
/// Returns (index, score) pairs sorted by score descending (best matches
/// first), ties broken by catalog order. Uses the global pre-compiled
/// matcher for performance.
///
/// An empty query returns all streams in catalog order with score 0.
pub fn filter_streams(query: &str, streams: &[StreamRecord], search_urls: bool) -> Vec<(usize, i64)> {
    if query.is_empty() {
        return (0..streams.len()).map(|i| (i, 0)).collect();
    }

    let matcher = global_matcher();
    let query_lower = query.to_lowercase();

    let mut results: Vec<(usize, i64)> = streams
        .iter()
        .enumerate()
        .filter_map(|(i, stream)| {
            let name = stream.name.to_lowercase();
            if let Some(score) = matcher.fuzzy_match(&name, &query_lower) {
                return Some((i, score));
            }
            if search_urls {
                let url = stream.url.to_lowercase();
                if let Some(score) = matcher.fuzzy_match(&url, &query_lower) {
                    return Some((i, score / 2));
                }
            }
            None
        })
        .collect();

    results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    results
}

/// Get the score for a single text/query pair.
pub fn match_score(text: &str, query: &str) -> Option<i64> {
    if query.is_empty() {
        return Some(0);
    }
    global_matcher().fuzzy_match(&text.to_lowercase(), &query.to_lowercase())
}

/// Check whether a text matches a query at all.
pub fn matches(text: &str, query: &str) -> bool {
    match_score(text, query).is_some()
}

/// Get the matched character indices for highlighting.
pub fn get_match_indices(text: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }
    global_matcher()
        .fuzzy_indices(&text.to_lowercase(), &query.to_lowercase())
        .map(|(_, indices)| indices)
}
