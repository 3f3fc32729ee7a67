//! Error types for the event ideator.

use crate::workflow::CallSite;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, IdeatorError>;

/// Errors that can occur while generating event ideas.
#[derive(Error, Debug)]
pub enum IdeatorError {
    /// The event description was empty or whitespace only.
    #[error("Please enter an event description.")]
    EmptyDescription,

    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error during serialization/deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// LLM API error.
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// LLM response parsing error.
    #[error("Failed to parse LLM response: {0}")]
    LlmParse(String),

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A critical remote call failed and the run was aborted.
    #[error("{site} failed: {source}")]
    Stage {
        site: CallSite,
        #[source]
        source: Box<IdeatorError>,
    },
}

impl IdeatorError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap an error with the call site that produced it.
    pub fn stage(site: CallSite, source: IdeatorError) -> Self {
        Self::Stage {
            site,
            source: Box::new(source),
        }
    }
}

impl From<reqwest::Error> for IdeatorError {
    fn from(err: reqwest::Error) -> Self {
        IdeatorError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for IdeatorError {
    fn from(err: serde_json::Error) -> Self {
        IdeatorError::LlmParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_error_names_call_site() {
        let err = IdeatorError::stage(
            CallSite::IdeaGeneration,
            IdeatorError::LlmApi("boom".to_string()),
        );
        assert_eq!(err.to_string(), "idea generation failed: LLM API error: boom");
    }
}
