//! Web search through the model's search-augmented generation mode.
//!
//! The service answers in free text. Result lines are recovered
//! heuristically: any line mentioning `http` is a candidate, and a
//! `" - "` separator splits it into a title and a url.

use crate::error::Result;
use crate::llm::{LanguageModel, Prompts};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default cap on parsed search results.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A (title, url) pair recovered from search output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Issues search-augmented requests and parses their output.
pub struct WebSearcher<'a> {
    model: &'a dyn LanguageModel,
    brand: String,
    max_results: usize,
}

impl<'a> WebSearcher<'a> {
    pub fn new(model: &'a dyn LanguageModel, brand: impl Into<String>) -> Self {
        Self {
            model,
            brand: brand.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Override the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Build the search instruction for a keyword list.
    pub fn query(&self, keywords: &[String]) -> String {
        Prompts::fill(
            Prompts::web_search(),
            &[
                ("brand", self.brand.as_str()),
                ("keywords", keywords.join(", ").as_str()),
            ],
        )
    }

    /// Search for pages related to the keywords.
    #[instrument(skip_all, fields(keywords = keywords.len()))]
    pub async fn search(&self, keywords: &[String]) -> Result<Vec<SearchResult>> {
        let output = self.model.web_search(&self.query(keywords)).await?;
        let results = parse_search_results(&output, self.max_results);
        debug!(count = results.len(), "parsed search results");
        Ok(results)
    }
}

/// Recover up to `limit` (title, url) pairs from free-text search output.
///
/// Lines without `http` are dropped. Parsing never fails.
pub fn parse_search_results(text: &str, limit: usize) -> Vec<SearchResult> {
    text.trim()
        .lines()
        .filter(|line| line.contains("http"))
        .map(parse_result_line)
        .take(limit)
        .collect()
}

fn parse_result_line(line: &str) -> SearchResult {
    match line.split_once(" - ") {
        Some((title, url)) => SearchResult::new(title.trim(), url.trim()),
        None => {
            let url = line.trim();
            SearchResult::new(url, url)
        }
    }
}
