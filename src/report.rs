//! The assembled ideation result, its markdown rendering, and saving to disk.
//!
//! Reports save as JSON (machine-readable) or markdown (the rendered view),
//! chosen by file extension.

use crate::error::{IdeatorError, Result};
use crate::keywords::title_case;
use crate::search::SearchResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// One-line description for a keyword. `None` when the summary call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSummary {
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeywordSummary {
    /// Markdown bullet with the keyword bolded and title-cased.
    pub fn to_markdown(&self) -> String {
        match &self.description {
            Some(desc) => format!("- **{}**: {}", title_case(&self.keyword), desc),
            None => format!("- **{}**", title_case(&self.keyword)),
        }
    }
}

/// Everything a workflow run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeationReport {
    /// Brand the concepts were generated for.
    pub brand: String,
    /// Merged, sorted keyword list.
    pub keywords: Vec<String>,
    /// Search inspiration (possibly empty).
    pub search_results: Vec<SearchResult>,
    /// Summaries for the leading keywords.
    pub summaries: Vec<KeywordSummary>,
    /// Idea markdown exactly as the model returned it.
    pub ideas: String,
}

impl IdeationReport {
    /// Render the report as the markdown shown to the user.
    pub fn to_markdown(&self) -> String {
        let relevant = self
            .summaries
            .iter()
            .map(KeywordSummary::to_markdown)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "\n\n🌐 **Relevant Ideas:**  \n{}\n\n💡 **Event Concepts Based on {}:**  \n{}\n",
            relevant, self.brand, self.ideas
        )
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| IdeatorError::Serialization(e.to_string()))
    }
}

impl fmt::Display for IdeationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// Save format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// Pretty-printed JSON.
    Json,
    /// Rendered markdown.
    Markdown,
}

impl SaveFormat {
    /// Determine format from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SaveFormat::Json,
            _ => SaveFormat::Markdown,
        }
    }
}

/// Save a report, picking the format from the path's extension.
pub fn save_report(report: &IdeationReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| IdeatorError::io(parent, e))?;
        }
    }

    let data = match SaveFormat::from_path(path) {
        SaveFormat::Json => report.to_json()?,
        SaveFormat::Markdown => report.to_markdown(),
    };

    fs::write(path, data).map_err(|e| IdeatorError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_report() -> IdeationReport {
        IdeationReport {
            brand: "iBoothMe".to_string(),
            keywords: vec!["audio diaries".to_string(), "smart vending".to_string()],
            search_results: vec![SearchResult::new("Site", "https://site.example")],
            summaries: vec![
                KeywordSummary {
                    keyword: "audio diaries".to_string(),
                    description: Some("Guests leave voice notes.".to_string()),
                },
                KeywordSummary {
                    keyword: "smart vending".to_string(),
                    description: None,
                },
            ],
            ideas: "### Voice Garden".to_string(),
        }
    }

    #[test]
    fn test_markdown_layout() {
        let md = sample_report().to_markdown();
        assert_eq!(
            md,
            "\n\n🌐 **Relevant Ideas:**  \n\
             - **Audio Diaries**: Guests leave voice notes.\n\
             - **Smart Vending**\n\n\
             💡 **Event Concepts Based on iBoothMe:**  \n\
             ### Voice Garden\n"
        );
    }

    #[test]
    fn test_save_format_from_path() {
        assert_eq!(SaveFormat::from_path(Path::new("out.json")), SaveFormat::Json);
        assert_eq!(SaveFormat::from_path(Path::new("out.md")), SaveFormat::Markdown);
        assert_eq!(SaveFormat::from_path(Path::new("out")), SaveFormat::Markdown);
    }

    #[test]
    fn test_save_json_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        save_report(&sample_report(), &path).unwrap();

        let loaded: IdeationReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.summaries, sample_report().summaries);
        assert_eq!(loaded.ideas, "### Voice Garden");
    }

    #[test]
    fn test_save_markdown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.md");

        save_report(&sample_report(), &path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("Relevant Ideas"));
        assert!(saved.contains("Event Concepts"));
    }
}
