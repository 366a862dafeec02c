//! Conversation management
//!
//! [`ConversationService`] is the only writer of the two conversation
//! stores. Every mutation of a conversation is a read-modify-write of its
//! record followed by an upsert of its index entry, serialized per id so
//! concurrent turns on the same conversation cannot lose an append.

use crate::ports::conversation_store::{ConversationIndex, ConversationRepository, StoreError};
use chrono::Utc;
use council_domain::{
    Conversation, ConversationMetadata, Message, Stage1Result, Stage2Result, Stage3Result,
    sort_newest_first,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info};
use uuid::Uuid;

/// One async lock per conversation id
///
/// An entry lives only while some caller holds or waits for its lock.
#[derive(Default)]
struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyedLocks {
    async fn acquire(&self, id: &str) -> KeyedGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(id.to_string()).or_default())
        };
        KeyedGuard {
            locks: self,
            id: id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    fn release(&self, id: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // The map's own Arc is the last one: nobody holds or waits for it
        if locks.get(id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(id);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

struct KeyedGuard<'a> {
    locks: &'a KeyedLocks,
    id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.locks.release(&self.id);
    }
}

/// Create, read, append to and delete conversations
pub struct ConversationService {
    records: Arc<dyn ConversationRepository>,
    index: Arc<dyn ConversationIndex>,
    locks: KeyedLocks,
}

impl ConversationService {
    pub fn new(records: Arc<dyn ConversationRepository>, index: Arc<dyn ConversationIndex>) -> Self {
        Self {
            records,
            index,
            locks: KeyedLocks::default(),
        }
    }

    /// Create an empty conversation with a fresh id.
    pub async fn create(&self) -> Result<Conversation, StoreError> {
        self.create_with_id(&Uuid::new_v4().to_string()).await
    }

    /// Create an empty conversation under `id`.
    ///
    /// When `id` already exists the stored conversation is returned as is.
    pub async fn create_with_id(&self, id: &str) -> Result<Conversation, StoreError> {
        let _guard = self.locks.acquire(id).await;

        if let Some(existing) = self.records.get(id).await? {
            debug!("Conversation {} already exists", id);
            return Ok(existing);
        }

        let conversation = Conversation::new(id, Utc::now());
        self.persist(&conversation).await?;
        info!("Created conversation {}", id);
        Ok(conversation)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        self.records.get(id).await
    }

    /// Index entries, newest first.
    pub async fn list(&self) -> Result<Vec<ConversationMetadata>, StoreError> {
        let mut entries = self.index.list().await?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Append a user message. `Ok(None)` when the conversation is unknown.
    pub async fn add_user_message(
        &self,
        id: &str,
        content: &str,
    ) -> Result<Option<Conversation>, StoreError> {
        self.modify(id, |conversation| {
            conversation.push(Message::user(content));
        })
        .await
    }

    /// Append an assistant message. `Ok(None)` when the conversation is unknown.
    pub async fn add_assistant_message(
        &self,
        id: &str,
        stage1: Vec<Stage1Result>,
        stage2: Vec<Stage2Result>,
        stage3: Stage3Result,
    ) -> Result<Option<Conversation>, StoreError> {
        self.modify(id, move |conversation| {
            conversation.push(Message::assistant(stage1, stage2, stage3));
        })
        .await
    }

    /// Replace the title. `Ok(None)` when the conversation is unknown.
    pub async fn update_title(
        &self,
        id: &str,
        title: &str,
    ) -> Result<Option<Conversation>, StoreError> {
        self.modify(id, |conversation| {
            conversation.title = title.to_string();
        })
        .await
    }

    /// Remove the record and its index entry. Returns whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.locks.acquire(id).await;
        let existed = self.records.get(id).await?.is_some();
        self.records.delete(id).await?;
        self.index.remove(id).await?;
        if existed {
            info!("Deleted conversation {}", id);
        }
        Ok(existed)
    }

    async fn modify(
        &self,
        id: &str,
        change: impl FnOnce(&mut Conversation),
    ) -> Result<Option<Conversation>, StoreError> {
        let _guard = self.locks.acquire(id).await;

        let Some(mut conversation) = self.records.get(id).await? else {
            return Ok(None);
        };
        change(&mut conversation);
        self.persist(&conversation).await?;
        Ok(Some(conversation))
    }

    async fn persist(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.records.save(conversation).await?;
        self.index.upsert(conversation.metadata()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::InMemoryStores;
    use council_domain::{DEFAULT_TITLE, Model};

    fn service() -> (ConversationService, Arc<InMemoryStores>) {
        let stores = Arc::new(InMemoryStores::default());
        let service = ConversationService::new(stores.clone(), stores.clone());
        (service, stores)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _) = service();
        let created = service.create().await.unwrap();

        assert_eq!(created.title, DEFAULT_TITLE);
        assert!(created.messages.is_empty());
        assert!(Uuid::parse_str(&created.id).is_ok());

        let loaded = service.get(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_with_existing_id_returns_existing() {
        let (service, _) = service();
        service.create_with_id("abc").await.unwrap();
        service.add_user_message("abc", "hello").await.unwrap();

        let again = service.create_with_id("abc").await.unwrap();
        assert_eq!(again.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let (service, _) = service();
        assert!(service.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_turn_updates_index() {
        let (service, _) = service();
        let conversation = service.create().await.unwrap();

        service
            .add_user_message(&conversation.id, "What is Rust?")
            .await
            .unwrap();
        service
            .add_assistant_message(
                &conversation.id,
                vec![],
                vec![],
                Stage3Result::new(Model::Gpt51, "A language."),
            )
            .await
            .unwrap();
        service
            .update_title(&conversation.id, "About Rust")
            .await
            .unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].message_count, 2);
        assert_eq!(listed[0].title, "About Rust");

        let stored = service.get(&conversation.id).await.unwrap().unwrap();
        assert!(stored.messages[0].is_user());
        assert!(!stored.messages[1].is_user());
    }

    #[tokio::test]
    async fn test_mutations_on_unknown_id() {
        let (service, stores) = service();
        assert!(service.add_user_message("nope", "hi").await.unwrap().is_none());
        assert!(service.update_title("nope", "t").await.unwrap().is_none());
        assert_eq!(stores.record_count(), 0);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (service, _) = service();
        let first = service.create().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.create().await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_delete_removes_both_stores() {
        let (service, stores) = service();
        let conversation = service.create().await.unwrap();

        assert!(service.delete(&conversation.id).await.unwrap());
        assert!(service.get(&conversation.id).await.unwrap().is_none());
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(stores.record_count(), 0);

        assert!(!service.delete(&conversation.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let (service, _) = service();
        let service = Arc::new(service);
        let id = service.create().await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = Arc::clone(&service);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                service
                    .add_user_message(&id, &format!("message {i}"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = service.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.messages.len(), 20);
        assert_eq!(service.list().await.unwrap()[0].message_count, 20);
    }

    #[tokio::test]
    async fn test_locks_released_after_use() {
        let (service, _) = service();
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for i in 0..10 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let id = service.create().await.unwrap().id;
                service.add_user_message(&id, &format!("q{i}")).await.unwrap();
                service.update_title(&id, "Title").await.unwrap();
                id
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        service.add_user_message("unknown", "hi").await.unwrap();

        assert_eq!(service.locks.len(), 0);
        assert_eq!(service.list().await.unwrap().len(), 10);
        assert!(service.delete(&ids[0]).await.unwrap());
        assert_eq!(service.locks.len(), 0);
    }
}
