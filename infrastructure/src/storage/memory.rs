//! In-memory conversation stores, used for `--ephemeral` runs

use async_trait::async_trait;
use council_application::{ConversationIndex, ConversationRepository, StoreError};
use council_domain::{Conversation, ConversationMetadata};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Records and listing index held in process memory
#[derive(Default)]
pub struct InMemoryConversationStore {
    records: RwLock<HashMap<String, Conversation>>,
    index: RwLock<HashMap<String, ConversationMetadata>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationStore {
    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(conversation.id.clone(), conversation.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ConversationIndex for InMemoryConversationStore {
    async fn list(&self) -> Result<Vec<ConversationMetadata>, StoreError> {
        Ok(self.index.read().await.values().cloned().collect())
    }

    async fn upsert(&self, entry: ConversationMetadata) -> Result<(), StoreError> {
        self.index.write().await.insert(entry.id.clone(), entry);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.index.write().await.remove(id);
        Ok(())
    }
}
