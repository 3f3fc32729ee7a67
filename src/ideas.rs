//! Branded event concept generation.

use crate::error::Result;
use crate::llm::{CompletionRequest, LanguageModel, Prompts};
use crate::search::SearchResult;
use tracing::{debug, instrument};

const IDEAS_TEMPERATURE: f32 = 0.95;
const IDEAS_MAX_TOKENS: u32 = 1000;

/// Asks the model for 6–7 event concepts built around a brand.
///
/// The prompt's theme constraints are advisory. The returned markdown is
/// passed through untouched.
pub struct IdeaGenerator<'a> {
    model: &'a dyn LanguageModel,
    brand: String,
}

impl<'a> IdeaGenerator<'a> {
    pub fn new(model: &'a dyn LanguageModel, brand: impl Into<String>) -> Self {
        Self {
            model,
            brand: brand.into(),
        }
    }

    /// Build the idea prompt for a description and its search inspiration.
    pub fn prompt(&self, paragraph: &str, results: &[SearchResult]) -> String {
        Prompts::fill(
            Prompts::generate_ideas(),
            &[
                ("brand", self.brand.as_str()),
                ("paragraph", paragraph),
                ("search_summary", search_summary(results).as_str()),
            ],
        )
    }

    #[instrument(skip_all, fields(inspiration = results.len()))]
    pub async fn generate(&self, paragraph: &str, results: &[SearchResult]) -> Result<String> {
        let prompt = self.prompt(paragraph, results);
        let ideas = self
            .model
            .complete(CompletionRequest::new(prompt, IDEAS_TEMPERATURE, IDEAS_MAX_TOKENS))
            .await?;
        debug!(chars = ideas.len(), "generated ideas");
        Ok(ideas)
    }
}

/// One `- title: url` line per search result.
fn search_summary(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("- {}: {}", r.title, r.url))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedModel};

    #[test]
    fn test_search_summary_lines() {
        let results = vec![
            SearchResult::new("Site A", "https://a.example"),
            SearchResult::new("Site B", "https://b.example"),
        ];
        assert_eq!(
            search_summary(&results),
            "- Site A: https://a.example\n- Site B: https://b.example"
        );
        assert_eq!(search_summary(&[]), "");
    }

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let model = ScriptedModel::new();
        let generator = IdeaGenerator::new(&model, "Snapbox");
        let prompt = generator.prompt(
            "Product launch",
            &[SearchResult::new("Site A", "https://a.example")],
        );

        assert!(prompt.contains("event strategist for Snapbox"));
        assert!(prompt.contains("Product launch"));
        assert!(prompt.contains("- Site A: https://a.example"));
        assert!(prompt.contains("(in just one idea)"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_prompt_keeps_braces_in_description() {
        let model = ScriptedModel::new();
        let generator = IdeaGenerator::new(&model, "iBoothMe");
        let prompt = generator.prompt(
            "Theme night {search_summary}",
            &[SearchResult::new("Site A", "https://a.example")],
        );

        assert!(prompt.contains("\nTheme night {search_summary}\n"));
        assert_eq!(prompt.matches("- Site A: https://a.example").count(), 1);
    }

    #[tokio::test]
    async fn test_generate_returns_raw_markdown() {
        let markdown = "### 1. Voice Garden\nGuests record...";
        let model = ScriptedModel::new().otherwise(Reply::text(markdown));
        let generator = IdeaGenerator::new(&model, "iBoothMe");

        let ideas = generator.generate("Women's Day", &[]).await.unwrap();
        assert_eq!(ideas, markdown);

        let calls = model.calls();
        assert_eq!(calls[0].temperature, 0.95);
        assert_eq!(calls[0].max_tokens, 1000);
    }
}
