//! Conversation storage settings from TOML (`[storage]` section)

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where conversations live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON files under `data_dir`
    File,
    /// Process memory; lost on exit
    Memory,
}

/// Conversation storage settings from TOML
///
/// # Example
///
/// ```toml
/// [storage]
/// data_dir = "~/.local/share/llm-council"
/// backend = "file"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Root directory for the file backend
    pub data_dir: PathBuf,
    /// `"file"` or `"memory"`
    pub backend: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: "file".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("llm-council"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl FileStorageConfig {
    /// Parse the backend name. Unknown values fall back to the file backend
    /// with a warning.
    pub fn parse_backend(&self) -> (StorageBackend, Vec<ConfigIssue>) {
        match self.backend.trim().to_lowercase().as_str() {
            "file" => (StorageBackend::File, Vec::new()),
            "memory" => (StorageBackend::Memory, Vec::new()),
            _ => (
                StorageBackend::File,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "storage.backend".to_string(),
                        value: self.backend.clone(),
                        valid_values: vec!["file".to_string(), "memory".to_string()],
                    },
                    format!(
                        "storage.backend: unknown value '{}', falling back to 'file'",
                        self.backend
                    ),
                )],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_backends() {
        let mut config = FileStorageConfig::default();
        assert_eq!(config.parse_backend().0, StorageBackend::File);
        config.backend = "Memory".to_string();
        assert_eq!(config.parse_backend().0, StorageBackend::Memory);
    }

    #[test]
    fn test_unknown_backend_warns() {
        let config = FileStorageConfig {
            backend: "sqlite".to_string(),
            ..Default::default()
        };
        let (backend, issues) = config.parse_backend();
        assert_eq!(backend, StorageBackend::File);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_default_data_dir_is_named() {
        let config = FileStorageConfig::default();
        assert!(
            config.data_dir.ends_with("llm-council") || config.data_dir.ends_with("data")
        );
    }
}
