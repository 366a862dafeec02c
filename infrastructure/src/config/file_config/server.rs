//! HTTP server settings from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// HTTP server settings from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// bind = "127.0.0.1:8787"
/// allowed_origins = ["http://localhost:5173"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address
    pub bind: String,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}
