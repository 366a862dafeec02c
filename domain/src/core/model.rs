//! Model value object representing an inference backend

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model identifiers routed through the inference backend (Value Object)
///
/// Well-known OpenRouter identifiers get their own variant; anything else
/// is carried verbatim in [`Model::Custom`], so parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI
    Gpt51,
    Gpt4oMini,
    // Google
    Gemini3Pro,
    Gemini25Flash,
    // Anthropic
    ClaudeSonnet45,
    // xAI
    Grok4,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the backend identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt51 => "openai/gpt-5.1",
            Model::Gpt4oMini => "openai/gpt-4o-mini",
            Model::Gemini3Pro => "google/gemini-3-pro-preview",
            Model::Gemini25Flash => "google/gemini-2.5-flash",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::Grok4 => "x-ai/grok-4",
            Model::Custom(s) => s,
        }
    }

    /// Default council panel
    pub fn default_panel() -> Vec<Model> {
        vec![
            Model::Gpt51,
            Model::Gemini3Pro,
            Model::ClaudeSonnet45,
            Model::Grok4,
        ]
    }

    /// Default chairman for the synthesis stage
    pub fn default_chairman() -> Model {
        Model::Gpt51
    }

    /// Default chairman fallbacks, tried in order
    pub fn default_chairman_fallbacks() -> Vec<Model> {
        vec![Model::Gpt4oMini, Model::Gemini3Pro]
    }

    /// Default model for conversation titles
    pub fn default_title_model() -> Model {
        Model::Gemini25Flash
    }

    /// Provider prefix of the identifier, e.g. `"openai"` for `"openai/gpt-5.1"`
    pub fn provider(&self) -> Option<&str> {
        self.as_str().split_once('/').map(|(provider, _)| provider)
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::default_chairman()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "openai/gpt-5.1" => Model::Gpt51,
            "openai/gpt-4o-mini" => Model::Gpt4oMini,
            "google/gemini-3-pro-preview" => Model::Gemini3Pro,
            "google/gemini-2.5-flash" => Model::Gemini25Flash,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "x-ai/grok-4" => Model::Grok4,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
