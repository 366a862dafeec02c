//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! after validation.

mod council;
mod gateway;
mod server;
mod storage;

pub use council::FileCouncilConfig;
pub use gateway::{DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, FileGatewayConfig};
pub use server::FileServerConfig;
pub use storage::{FileStorageConfig, StorageBackend};

use council_application::CouncilConfig;
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Panel, chairman and title models
    pub council: FileCouncilConfig,
    /// Inference backend endpoint, credentials and timeouts
    pub gateway: FileGatewayConfig,
    /// HTTP listener and CORS
    pub server: FileServerConfig,
    /// Conversation persistence
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Build the council configuration, keeping built-in defaults for
    /// anything unset or invalid.
    pub fn to_council_config(&self) -> CouncilConfig {
        let mut config = CouncilConfig::default()
            .with_query_timeout(Duration::from_secs(self.gateway.timeout_secs))
            .with_title_timeout(Duration::from_secs(self.gateway.title_timeout_secs));

        if let (Some(models), _) = self.council.parse_models() {
            config = config.with_panel(models);
        }
        if let (Some(chairman), _) = self.council.parse_chairman() {
            config = config.with_chairman(chairman);
        }
        if let (Some(fallbacks), _) = self.council.parse_chairman_fallbacks() {
            config = config.with_chairman_fallbacks(fallbacks);
        }
        if let (Some(title_model), _) = self.council.parse_title_model() {
            config = config.with_title_model(title_model);
        }
        config
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks, in order:
    /// 1. Empty model names in `[council]`
    /// 2. The resulting panel (empty, or too large to label)
    /// 3. Zero timeouts
    /// 4. The server bind address
    /// 5. The storage backend name
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Model parse validation (catches empty names)
        issues.extend(self.council.parse_models().1);
        issues.extend(self.council.parse_chairman().1);
        issues.extend(self.council.parse_chairman_fallbacks().1);
        issues.extend(self.council.parse_title_model().1);

        // 2. Lineup validation
        issues.extend(self.to_council_config().validate());

        // 3. Timeouts
        for (field, value) in [
            ("gateway.timeout_secs", self.gateway.timeout_secs),
            ("gateway.title_timeout_secs", self.gateway.title_timeout_secs),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout {
                        field: field.to_string(),
                    },
                    format!("{field}: timeout cannot be 0"),
                ));
            }
        }

        // 4. Bind address
        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBindAddress {
                    value: self.server.bind.clone(),
                },
                format!(
                    "server.bind: '{}' is not a valid host:port address",
                    self.server.bind
                ),
            ));
        }

        // 5. Storage backend
        issues.extend(self.storage.parse_backend().1);

        issues
    }
}
