//! Council model lineup from TOML (`[council]` section)

use council_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Council model lineup from TOML
///
/// Every field is optional; unset fields keep the built-in lineup.
///
/// # Example
///
/// ```toml
/// [council]
/// models = ["openai/gpt-5.1", "anthropic/claude-sonnet-4.5", "x-ai/grok-4"]
/// chairman = "openai/gpt-5.1"
/// chairman_fallbacks = ["openai/gpt-4o-mini"]
/// title_model = "google/gemini-2.5-flash"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Panel members, in label order
    pub models: Option<Vec<String>>,
    /// Primary chairman for synthesis
    pub chairman: Option<String>,
    /// Chairman fallbacks, tried in order
    pub chairman_fallbacks: Option<Vec<String>>,
    /// Model for conversation titles
    pub title_model: Option<String>,
}

impl FileCouncilConfig {
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: format!("council.{field}"),
                    },
                    format!("council.{field}: model name cannot be empty"),
                )],
            ),
            Some(s) => (Some(Model::from(s.trim())), Vec::new()),
        }
    }

    fn parse_model_list(
        field: &str,
        values: Option<&Vec<String>>,
    ) -> (Option<Vec<Model>>, Vec<ConfigIssue>) {
        let Some(strings) = values else {
            return (None, Vec::new());
        };

        let mut issues = Vec::new();
        let mut models = Vec::new();
        for s in strings {
            if s.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: format!("council.{field}"),
                    },
                    format!("council.{field}: model name cannot be empty in list"),
                ));
            } else {
                models.push(Model::from(s.trim()));
            }
        }
        (Some(models), issues)
    }

    pub fn parse_models(&self) -> (Option<Vec<Model>>, Vec<ConfigIssue>) {
        Self::parse_model_list("models", self.models.as_ref())
    }

    pub fn parse_chairman(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("chairman", self.chairman.as_ref())
    }

    pub fn parse_chairman_fallbacks(&self) -> (Option<Vec<Model>>, Vec<ConfigIssue>) {
        Self::parse_model_list("chairman_fallbacks", self.chairman_fallbacks.as_ref())
    }

    pub fn parse_title_model(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("title_model", self.title_model.as_ref())
    }
}
