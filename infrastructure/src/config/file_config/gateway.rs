//! Inference backend settings from TOML (`[gateway]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Inference backend settings from TOML
///
/// # Example
///
/// ```toml
/// [gateway]
/// endpoint = "https://openrouter.ai/api/v1/chat/completions"
/// api_key_env = "OPENROUTER_API_KEY"
/// timeout_secs = 120
/// title_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Chat-completions URL
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout for panel and chairman calls
    pub timeout_secs: u64,
    /// Per-request timeout for title generation
    pub title_timeout_secs: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 120,
            title_timeout_secs: 30,
        }
    }
}

impl FileGatewayConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// An unset or empty variable yields `None`.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
