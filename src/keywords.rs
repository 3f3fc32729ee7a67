//! Keyword extraction and merging.
//!
//! The remote model is asked for a comma-separated list. The reply is
//! split on commas or newlines; nothing else about its shape is assumed.

use crate::error::Result;
use crate::llm::{CompletionRequest, LanguageModel, Prompts};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

const BASE_TEMPERATURE: f32 = 0.7;
const BASE_MAX_TOKENS: u32 = 200;
const LINK_TEMPERATURE: f32 = 0.6;
const LINK_MAX_TOKENS: u32 = 150;

/// Extracts short thematic keywords through the remote model.
pub struct KeywordExtractor<'a> {
    model: &'a dyn LanguageModel,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(model: &'a dyn LanguageModel) -> Self {
        Self { model }
    }

    /// Extract 5–10 keywords from an event description.
    #[instrument(skip_all)]
    pub async fn extract(&self, paragraph: &str) -> Result<Vec<String>> {
        let prompt = Prompts::fill(Prompts::extract_keywords(), &[("paragraph", paragraph)]);
        let raw = self
            .model
            .complete(CompletionRequest::new(prompt, BASE_TEMPERATURE, BASE_MAX_TOKENS))
            .await?;

        let keywords = parse_keyword_list(&raw);
        debug!(count = keywords.len(), "extracted base keywords");
        Ok(keywords)
    }

    /// Extract 3–5 keywords describing a single search result.
    #[instrument(skip(self))]
    pub async fn extract_from_link(&self, title: &str, link: &str) -> Result<Vec<String>> {
        let prompt = Prompts::fill(
            Prompts::extract_link_keywords(),
            &[("title", title), ("link", link)],
        );
        let raw = self
            .model
            .complete(CompletionRequest::new(prompt, LINK_TEMPERATURE, LINK_MAX_TOKENS))
            .await?;

        let keywords = parse_keyword_list(&raw);
        debug!(count = keywords.len(), "extracted link keywords");
        Ok(keywords)
    }
}

/// Split a delimited reply into trimmed, non-empty keywords.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

/// Union two keyword lists, dropping exact duplicates, in ascending order.
pub fn merge_keywords<I, J>(base: I, extra: J) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    J: IntoIterator<Item = String>,
{
    base.into_iter()
        .chain(extra)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Capitalise the first letter of every whitespace-separated word.
///
/// The rest of each word is left as-is, so acronyms such as "AR" survive.
pub fn title_case(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    let mut at_word_start = true;
    for c in keyword.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
