//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod openrouter;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileCouncilConfig, FileGatewayConfig, FileServerConfig,
    FileStorageConfig, StorageBackend,
};
pub use openrouter::OpenRouterGateway;
pub use storage::{FileConversationIndex, FileConversationRepository, InMemoryConversationStore};
