//! Council configuration.

use council_domain::{ConfigIssue, ConfigIssueCode, MAX_LABELS, Model};
use std::time::Duration;

/// Default per-request timeout for panel and chairman calls.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Default per-request timeout for title generation.
pub const DEFAULT_TITLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Models and timeouts used by a council run.
///
/// Constructed once at startup and shared read-only by every use case.
#[derive(Debug, Clone)]
pub struct CouncilConfig {
    /// Panel members, in the order their answers are labeled.
    pub panel: Vec<Model>,
    /// Primary chairman for stage 3.
    pub chairman: Model,
    /// Tried in order when the chairman does not answer.
    pub chairman_fallbacks: Vec<Model>,
    /// Model used to generate conversation titles.
    pub title_model: Model,
    pub query_timeout: Duration,
    pub title_timeout: Duration,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            panel: Model::default_panel(),
            chairman: Model::default_chairman(),
            chairman_fallbacks: Model::default_chairman_fallbacks(),
            title_model: Model::default_title_model(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            title_timeout: DEFAULT_TITLE_TIMEOUT,
        }
    }
}

impl CouncilConfig {
    pub fn with_panel(mut self, panel: Vec<Model>) -> Self {
        self.panel = panel;
        self
    }

    pub fn with_chairman(mut self, chairman: Model) -> Self {
        self.chairman = chairman;
        self
    }

    pub fn with_chairman_fallbacks(mut self, fallbacks: Vec<Model>) -> Self {
        self.chairman_fallbacks = fallbacks;
        self
    }

    pub fn with_title_model(mut self, model: Model) -> Self {
        self.title_model = model;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_title_timeout(mut self, timeout: Duration) -> Self {
        self.title_timeout = timeout;
        self
    }

    /// Chairman first, then each fallback, skipping repeats.
    pub fn chairman_candidates(&self) -> Vec<Model> {
        let mut candidates = vec![self.chairman.clone()];
        for model in &self.chairman_fallbacks {
            if !candidates.contains(model) {
                candidates.push(model.clone());
            }
        }
        candidates
    }

    /// Check the model lineup for problems that would make a run useless.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.panel.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyPanel,
                "council panel has no models",
            ));
        } else if self.panel.len() > MAX_LABELS {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::PanelTooLarge {
                    size: self.panel.len(),
                },
                format!(
                    "council panel has {} models, at most {} can be labeled",
                    self.panel.len(),
                    MAX_LABELS
                ),
            ));
        }

        let named = self
            .panel
            .iter()
            .map(|m| ("council.models", m))
            .chain(std::iter::once(("council.chairman", &self.chairman)))
            .chain(
                self.chairman_fallbacks
                    .iter()
                    .map(|m| ("council.chairman_fallbacks", m)),
            )
            .chain(std::iter::once(("council.title_model", &self.title_model)));

        for (field, model) in named {
            if model.as_str().trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("{field} contains an empty model name"),
                ));
            }
        }

        issues
    }
}
