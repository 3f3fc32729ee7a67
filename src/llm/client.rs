//! OpenAI-compatible LLM client.
//!
//! Covers the two call shapes the workflow needs: plain chat completions
//! and search-augmented generation through the Responses API with the
//! `web_search_preview` tool.

use crate::config::LlmConfig;
use crate::error::{IdeatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Message role in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single-prompt completion with its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_tokens,
        }
    }
}

/// The remote text-generation service as seen by the workflow.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one user prompt and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Run a search-augmented generation and return its free-text output.
    async fn web_search(&self, input: &str) -> Result<String>;
}

/// Request body for chat completion.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

/// Response from chat completion.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Request body for the Responses API.
#[derive(Debug, Serialize)]
struct WebSearchRequest<'a> {
    model: &'a str,
    tools: [Tool; 1],
    input: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    tool_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct WebSearchResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

/// Output items other than assistant messages (e.g. `web_search_call`) are skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

impl WebSearchResponse {
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                OutputItem::Other => None,
            })
            .flatten()
            .filter_map(|part| match part {
                ContentPart::OutputText { text } => Some(text.as_str()),
                ContentPart::Other => None,
            })
            .collect()
    }
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Response from an LLM call including metadata.
#[derive(Debug)]
pub struct LlmResponse {
    /// The generated content.
    pub content: String,
    /// Token usage (if available).
    pub usage: Option<TokenUsage>,
}

#[derive(Debug)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI-compatible LLM client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Model used for chat completions.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/v1/{}", base, path)
    }

    /// Get the chat completions endpoint URL.
    fn endpoint(&self) -> String {
        self.url("chat/completions")
    }

    /// Get the Responses API endpoint URL.
    fn responses_endpoint(&self) -> String {
        self.url("responses")
    }

    /// POST a JSON body and return the raw success body, mapping API errors.
    async fn post_json<T: Serialize + ?Sized>(&self, url: String, body: &T) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(IdeatorError::LlmApi(format!(
                    "API error ({}): {}",
                    status, api_error.error.message
                )));
            }
            return Err(IdeatorError::LlmApi(format!(
                "Request failed ({}): {}",
                status, body
            )));
        }

        Ok(body)
    }

    /// Send a chat completion request.
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<LlmResponse> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens,
            temperature,
        };

        let body = self.post_json(self.endpoint(), &request).await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| IdeatorError::LlmApi("No choices in response".to_string()))?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        if let Some(u) = &usage {
            debug!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat completion usage"
            );
        }

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
        })
    }

    /// Test connectivity to the API.
    pub async fn test_connection(&self) -> Result<()> {
        let messages = vec![Message::user("Say 'hello' and nothing else.")];

        let response = self.chat(messages, 0.0, 16).await?;

        if response.content.to_lowercase().contains("hello") {
            Ok(())
        } else {
            Err(IdeatorError::LlmApi(format!(
                "Unexpected response: {}",
                response.content
            )))
        }
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let response = self
            .chat(
                vec![Message::user(request.prompt)],
                request.temperature,
                request.max_tokens,
            )
            .await?;
        Ok(response.content)
    }

    async fn web_search(&self, input: &str) -> Result<String> {
        let request = WebSearchRequest {
            model: &self.config.search_model,
            tools: [Tool {
                tool_type: "web_search_preview",
            }],
            input,
        };

        let body = self.post_json(self.responses_endpoint(), &request).await?;
        let response: WebSearchResponse = serde_json::from_str(&body)?;

        let text = response.output_text();
        if text.trim().is_empty() {
            return Err(IdeatorError::LlmApi(
                "Search response contained no output text".to_string(),
            ));
        }
        Ok(text)
    }
}
