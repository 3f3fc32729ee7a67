//! Configuration for the event ideator.
//!
//! Supports a `.env` file, environment variables and a YAML config file.
//! Environment variables take precedence over config file values.

use crate::error::{IdeatorError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// LLM configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL for the LLM API (e.g., "https://api.openai.com")
    pub api_base: String,

    /// API key for authentication
    pub api_key: String,

    /// Model used for chat completions (e.g., "gpt-4")
    pub model: String,

    /// Model used for search-augmented generation (e.g., "gpt-4.1")
    pub search_model: String,

    /// Request timeout in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4".to_string(),
            search_model: "gpt-4.1".to_string(),
            timeout_secs: None,
        }
    }
}

/// Workflow tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Brand the ideas and search query are built around.
    pub brand: String,

    /// Maximum number of in-flight calls during fan-out stages.
    pub concurrency: usize,

    /// Number of merged keywords that receive a one-line description.
    pub max_summaries: usize,

    /// Cap on parsed search results.
    pub max_search_results: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            brand: "iBoothMe".to_string(),
            concurrency: 4,
            max_summaries: 10,
            max_search_results: 10,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM settings
    pub llm: LlmConfig,

    /// Workflow settings
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Configuration file structure (YAML format).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    llm: Option<LlmFileSection>,
    workflow: Option<WorkflowFileSection>,
}

#[derive(Debug, Deserialize)]
struct LlmFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    search_model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WorkflowFileSection {
    brand: Option<String>,
    concurrency: Option<usize>,
    max_summaries: Option<usize>,
    max_search_results: Option<usize>,
}

impl Config {
    /// Load configuration from `.env`, environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LLM_API_KEY / OPENAI_API_KEY, LLM_MODEL, IDEATOR_BRAND, ...)
    /// 2. Config file (~/.config/event-ideator/config.yaml)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        // A missing .env is fine; the process environment may already carry the key.
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::load_from_file(&config_path)?;
            }
        }

        config.apply_overrides(|key| env::var(key).ok());

        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in [`Config::load`]).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = lookup("LLM_API_BASE") {
            self.llm.api_base = api_base;
        }

        if let Some(api_key) = lookup("LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.llm.api_key = api_key;
        }

        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }

        if let Some(model) = lookup("LLM_SEARCH_MODEL") {
            self.llm.search_model = model;
        }

        if let Some(timeout) = lookup("LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.llm.timeout_secs = Some(timeout);
        }

        if let Some(brand) = lookup("IDEATOR_BRAND") {
            self.workflow.brand = brand;
        }

        if let Some(concurrency) = lookup("IDEATOR_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.workflow.concurrency = concurrency;
        }

        if let Some(max) = lookup("IDEATOR_MAX_SUMMARIES").and_then(|v| v.parse().ok()) {
            self.workflow.max_summaries = max;
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IdeatorError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text, filling gaps with defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file_config: ConfigFile = serde_yaml::from_str(content)
            .map_err(|e| IdeatorError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut config = Config::default();

        if let Some(llm) = file_config.llm {
            if let Some(api_base) = llm.api_base {
                config.llm.api_base = api_base;
            }
            if let Some(api_key) = llm.api_key {
                config.llm.api_key = api_key;
            }
            if let Some(model) = llm.model {
                config.llm.model = model;
            }
            if let Some(search_model) = llm.search_model {
                config.llm.search_model = search_model;
            }
            config.llm.timeout_secs = llm.timeout_secs;
        }

        if let Some(workflow) = file_config.workflow {
            if let Some(brand) = workflow.brand {
                config.workflow.brand = brand;
            }
            if let Some(concurrency) = workflow.concurrency {
                config.workflow.concurrency = concurrency;
            }
            if let Some(max_summaries) = workflow.max_summaries {
                config.workflow.max_summaries = max_summaries;
            }
            if let Some(max_search_results) = workflow.max_search_results {
                config.workflow.max_search_results = max_search_results;
            }
        }

        Ok(config)
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "event-ideator")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_base.is_empty() {
            return Err(IdeatorError::Config(
                "LLM API base URL is required. Set LLM_API_BASE environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.api_key.is_empty() {
            return Err(IdeatorError::Config(
                "LLM API key is required. Set OPENAI_API_KEY (or LLM_API_KEY) in the environment, a .env file, or the config file.".to_string()
            ));
        }

        if self.llm.model.is_empty() || self.llm.search_model.is_empty() {
            return Err(IdeatorError::Config(
                "LLM model is required. Set LLM_MODEL / LLM_SEARCH_MODEL or add to config file."
                    .to_string(),
            ));
        }

        if self.workflow.concurrency == 0 {
            return Err(IdeatorError::InvalidConfig(
                "workflow.concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// API key reduced to its first characters, for display.
    pub fn masked_api_key(&self) -> String {
        let key = &self.llm.api_key;
        let visible: String = key.chars().take(8).collect();
        format!("{}...", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with_key(api_key: &str) -> Config {
        Config {
            llm: LlmConfig {
                api_base: "https://api.example.com".to_string(),
                api_key: api_key.to_string(),
                ..Default::default()
            },
            workflow: WorkflowConfig::default(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.api_base, "https://api.openai.com");
        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.llm.search_model, "gpt-4.1");
        assert_eq!(config.llm.timeout_secs, None);
        assert_eq!(config.workflow.brand, "iBoothMe");
        assert_eq!(config.workflow.concurrency, 4);
        assert_eq!(config.workflow.max_summaries, 10);
        assert_eq!(config.workflow.max_search_results, 10);
    }

    #[test]
    fn test_validate_fails_without_api_key() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = config_with_key("key");
        assert!(config.validate().is_ok());

        config.workflow.concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(IdeatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overrides_fall_back_to_openai_key() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "sk-openai"),
            ("IDEATOR_BRAND", "Acme"),
            ("IDEATOR_CONCURRENCY", "2"),
            ("LLM_TIMEOUT_SECS", "not-a-number"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key, "sk-openai");
        assert_eq!(config.workflow.brand, "Acme");
        assert_eq!(config.workflow.concurrency, 2);
        assert_eq!(config.llm.timeout_secs, None);
    }

    #[test]
    fn test_llm_api_key_wins_over_openai_key() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("OPENAI_API_KEY", "sk-openai"), ("LLM_API_KEY", "sk-llm")]);
        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.llm.api_key, "sk-llm");
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r#"
llm:
  api_key: sk-file
  timeout_secs: 30
workflow:
  brand: Photobox
  max_summaries: 5
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.llm.api_key, "sk-file");
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.llm.timeout_secs, Some(30));
        assert_eq!(config.workflow.brand, "Photobox");
        assert_eq!(config.workflow.max_summaries, 5);
        assert_eq!(config.workflow.concurrency, 4);
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(matches!(
            Config::from_yaml("llm: [not, a, map"),
            Err(IdeatorError::Config(_))
        ));
    }

    #[test]
    fn test_masked_api_key() {
        let config = config_with_key("sk-1234567890");
        assert_eq!(config.masked_api_key(), "sk-12345...");
    }
}
