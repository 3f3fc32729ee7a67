//! LLM integration module.
//!
//! Provides an OpenAI-compatible client for chat and search-augmented calls,
//! the [`LanguageModel`] seam the workflow is written against, and the
//! prompts used at each stage.

mod client;
mod prompts;

pub use client::{CompletionRequest, LanguageModel, LlmClient, LlmResponse, Message, Role, TokenUsage};
pub use prompts::Prompts;
