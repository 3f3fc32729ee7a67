//! Event Ideator - turns a free-text event description into branded event concepts.
//!
//! The workflow chains calls to an OpenAI-compatible LLM API:
//! 1. Extract thematic keywords from the description
//! 2. Run a search-augmented request for related pages
//! 3. Extract more keywords from each search result
//! 4. Generate 6–7 event concepts grounded in the search inspiration
//! 5. Describe the leading keywords in one line each
//!
//! # Quick Start
//!
//! ```no_run
//! use event_ideator::{config::Config, llm::LlmClient, workflow::Workflow};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!
//!     let client = LlmClient::new(config.llm.clone());
//!     let workflow = Workflow::new(client, config.workflow.clone());
//!
//!     let markdown = workflow.run("Women's Day celebration for employees").await?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **LlmClient**: OpenAI-compatible client behind the [`LanguageModel`] trait
//! - **KeywordExtractor**: keyword extraction and delimiter parsing
//! - **WebSearcher**: search-augmented generation and result-line parsing
//! - **IdeaGenerator**: branded event concept generation
//! - **Workflow**: stage sequencing and the per-call-site failure policy
//! - **IdeationReport**: the assembled result and its markdown rendering

pub mod config;
pub mod error;
pub mod ideas;
pub mod keywords;
pub mod llm;
pub mod report;
pub mod search;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{IdeatorError, Result};
pub use ideas::IdeaGenerator;
pub use keywords::{KeywordExtractor, merge_keywords, parse_keyword_list};
pub use llm::{LanguageModel, LlmClient};
pub use report::{IdeationReport, KeywordSummary, save_report};
pub use search::{SearchResult, WebSearcher, parse_search_results};
pub use workflow::{CallPolicy, CallSite, EMPTY_DESCRIPTION_MESSAGE, Workflow};
