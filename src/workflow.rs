//! The ideation workflow.
//!
//! Stages run in a fixed order:
//! validate → base keywords → search → link keywords → merge →
//! ideas → keyword summaries → assemble.
//!
//! Every remote call goes through [`Workflow::guard`] with its [`CallSite`].
//! Critical sites abort the run; best-effort sites log and fall back to a
//! degraded default. The two fan-out stages run as ordered streams bounded
//! by `concurrency`.

use crate::config::WorkflowConfig;
use crate::error::{IdeatorError, Result};
use crate::ideas::IdeaGenerator;
use crate::keywords::{KeywordExtractor, merge_keywords};
use crate::llm::{CompletionRequest, LanguageModel, Prompts};
use crate::report::{IdeationReport, KeywordSummary};
use crate::search::WebSearcher;
use futures::{StreamExt, TryStreamExt, stream};
use std::fmt;
use std::future::Future;
use tracing::{info, instrument, warn};

/// Returned by [`Workflow::run`] for blank input.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "❌ Please enter an event description.";

const SUMMARY_TEMPERATURE: f32 = 0.6;
const SUMMARY_MAX_TOKENS: u32 = 60;

/// Each place the workflow calls the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    BaseKeywords,
    WebSearch,
    LinkKeywords,
    IdeaGeneration,
    KeywordSummary,
}

/// What happens when a call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPolicy {
    /// Failure aborts the run.
    Critical,
    /// Failure is logged and replaced by a degraded default.
    BestEffort,
}

impl CallSite {
    pub fn policy(self) -> CallPolicy {
        match self {
            CallSite::BaseKeywords | CallSite::LinkKeywords | CallSite::IdeaGeneration => {
                CallPolicy::Critical
            }
            CallSite::WebSearch | CallSite::KeywordSummary => CallPolicy::BestEffort,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallSite::BaseKeywords => "base keyword extraction",
            CallSite::WebSearch => "web search",
            CallSite::LinkKeywords => "link keyword extraction",
            CallSite::IdeaGeneration => "idea generation",
            CallSite::KeywordSummary => "keyword summary",
        };
        f.write_str(name)
    }
}

/// Runs the ideation pipeline against a [`LanguageModel`].
pub struct Workflow<M> {
    model: M,
    config: WorkflowConfig,
}

impl<M: LanguageModel> Workflow<M> {
    pub fn new(model: M, config: WorkflowConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    fn fan_out(&self) -> usize {
        self.config.concurrency.max(1)
    }

    /// Run the workflow and render the result as markdown.
    ///
    /// Blank input yields [`EMPTY_DESCRIPTION_MESSAGE`] without any remote call.
    pub async fn run(&self, description: &str) -> Result<String> {
        match self.ideate(description).await {
            Ok(report) => Ok(report.to_markdown()),
            Err(IdeatorError::EmptyDescription) => Ok(EMPTY_DESCRIPTION_MESSAGE.to_string()),
            Err(e) => Err(e),
        }
    }

    /// Run the workflow and return the structured report.
    #[instrument(skip_all, fields(brand = %self.config.brand))]
    pub async fn ideate(&self, description: &str) -> Result<IdeationReport> {
        if description.trim().is_empty() {
            return Err(IdeatorError::EmptyDescription);
        }
        info!("started workflow");

        let model: &dyn LanguageModel = &self.model;
        let extractor = KeywordExtractor::new(model);

        info!("extracting keywords from description");
        let base_keywords = Self::guard(CallSite::BaseKeywords, extractor.extract(description))
            .await?
            .unwrap_or_default();

        info!(keywords = base_keywords.len(), "searching for related pages");
        let searcher = WebSearcher::new(model, self.config.brand.as_str())
            .with_max_results(self.config.max_search_results);
        let search_results = Self::guard(CallSite::WebSearch, searcher.search(&base_keywords))
            .await?
            .unwrap_or_default();

        info!(results = search_results.len(), "extracting keywords from search results");
        let link_keywords: Vec<Option<Vec<String>>> = stream::iter(&search_results)
            .map(|r| {
                Self::guard(
                    CallSite::LinkKeywords,
                    extractor.extract_from_link(&r.title, &r.url),
                )
            })
            .buffered(self.fan_out())
            .try_collect()
            .await?;

        let keywords = merge_keywords(base_keywords, link_keywords.into_iter().flatten().flatten());

        info!(keywords = keywords.len(), "generating ideas");
        let generator = IdeaGenerator::new(model, self.config.brand.as_str());
        let ideas = Self::guard(
            CallSite::IdeaGeneration,
            generator.generate(description, &search_results),
        )
        .await?
        .unwrap_or_default();

        info!(limit = self.config.max_summaries, "summarizing keywords");
        let summaries: Vec<KeywordSummary> = stream::iter(keywords.iter().take(self.config.max_summaries))
            .map(|kw| self.summarize(kw))
            .buffered(self.fan_out())
            .try_collect()
            .await?;

        info!("workflow complete");
        Ok(IdeationReport {
            brand: self.config.brand.clone(),
            keywords,
            search_results,
            summaries,
            ideas,
        })
    }

    /// Ask for a one-line description of a keyword.
    async fn summarize(&self, keyword: &str) -> Result<KeywordSummary> {
        let prompt = Prompts::fill(Prompts::summarize_keyword(), &[("keyword", keyword)]);
        let request = CompletionRequest::new(prompt, SUMMARY_TEMPERATURE, SUMMARY_MAX_TOKENS);

        let description = Self::guard(CallSite::KeywordSummary, self.model.complete(request))
            .await?
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(KeywordSummary {
            keyword: keyword.to_string(),
            description,
        })
    }

    /// Apply the call site's failure policy to a remote call.
    ///
    /// `Ok(None)` only ever comes from a best-effort site.
    async fn guard<T>(site: CallSite, call: impl Future<Output = Result<T>>) -> Result<Option<T>> {
        match call.await {
            Ok(value) => Ok(Some(value)),
            Err(err) => match site.policy() {
                CallPolicy::Critical => Err(IdeatorError::stage(site, err)),
                CallPolicy::BestEffort => {
                    warn!(%site, error = %err, "call failed, continuing without it");
                    Ok(None)
                }
            },
        }
    }
}
