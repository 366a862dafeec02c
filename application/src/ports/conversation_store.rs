//! Conversation storage ports
//!
//! Two stores back the conversation service: full records keyed by id, and
//! a metadata index used for listings. The service keeps them consistent.

use async_trait::async_trait;
use council_domain::{Conversation, ConversationMetadata};
use thiserror::Error;

/// Errors raised by storage adapters
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid conversation id: {0}")]
    InvalidId(String),

    #[error("Storage error: {0}")]
    Other(String),
}

/// Full conversation records
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Load a record; `Ok(None)` when the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError>;

    /// Insert or replace a record.
    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError>;

    /// Remove a record. Removing an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Listing index of conversation metadata
#[async_trait]
pub trait ConversationIndex: Send + Sync {
    /// Every indexed entry, in no particular order.
    async fn list(&self) -> Result<Vec<ConversationMetadata>, StoreError>;

    /// Insert or replace the entry with the same id.
    async fn upsert(&self, entry: ConversationMetadata) -> Result<(), StoreError>;

    /// Remove the entry with this id, if present.
    async fn remove(&self, id: &str) -> Result<(), StoreError>;
}
