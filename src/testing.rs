//! Scripted [`LanguageModel`] for unit tests.

use crate::error::{IdeatorError, Result};
use crate::llm::{CompletionRequest, LanguageModel};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Fail(String),
}

impl Reply {
    pub(crate) fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    pub(crate) fn fail(s: impl Into<String>) -> Self {
        Reply::Fail(s.into())
    }

    fn resolve(&self) -> Result<String> {
        match self {
            Reply::Text(s) => Ok(s.clone()),
            Reply::Fail(msg) => Err(IdeatorError::LlmApi(msg.clone())),
        }
    }
}

/// Answers prompts by the first rule whose needle occurs in the prompt.
pub(crate) struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    fallback: Reply,
    search: Reply,
    delays: Vec<(String, Duration)>,
    calls: Mutex<Vec<CompletionRequest>>,
    finished: Mutex<Vec<String>>,
    searches: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Reply::text(""),
            search: Reply::fail("search not scripted"),
            delays: Vec::new(),
            calls: Mutex::new(Vec::new()),
            finished: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn on(mut self, needle: impl Into<String>, reply: Reply) -> Self {
        self.rules.push((needle.into(), reply));
        self
    }

    pub(crate) fn otherwise(mut self, reply: Reply) -> Self {
        self.fallback = reply;
        self
    }

    /// Hold back replies to prompts containing `needle`.
    pub(crate) fn delay(mut self, needle: impl Into<String>, delay: Duration) -> Self {
        self.delays.push((needle.into(), delay));
        self
    }

    pub(crate) fn search(mut self, reply: Reply) -> Self {
        self.search = reply;
        self
    }

    pub(crate) fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Prompts in the order their replies were produced.
    pub(crate) fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }

    pub(crate) fn search_calls(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls().len() + self.search_calls().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone());
        let delay = self
            .delays
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle.as_str()))
            .map(|(_, delay)| *delay);
        let prompt = request.prompt.clone();
        self.calls.lock().unwrap().push(request);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.finished.lock().unwrap().push(prompt);
        reply.resolve()
    }

    async fn web_search(&self, input: &str) -> Result<String> {
        self.searches.lock().unwrap().push(input.to_string());
        self.search.resolve()
    }
}
