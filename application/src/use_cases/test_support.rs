//! Shared test doubles for the use case tests.

use crate::config::CouncilConfig;
use crate::ports::conversation_store::{ConversationIndex, ConversationRepository, StoreError};
use crate::ports::llm_gateway::InferenceGateway;
use crate::use_cases::generate_title::GenerateTitleUseCase;
use crate::use_cases::manage_conversations::ConversationService;
use crate::use_cases::run_council::RunCouncilUseCase;
use crate::use_cases::send_message::SendMessageUseCase;
use async_trait::async_trait;
use council_domain::{ChatMessage, Conversation, ConversationMetadata, Model, ModelReply};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PromptKind {
    Answer,
    Rank,
    Synthesize,
    Title,
}

fn classify(prompt: &str) -> PromptKind {
    if prompt.starts_with("You are evaluating") {
        PromptKind::Rank
    } else if prompt.starts_with("You are the Chairman") {
        PromptKind::Synthesize
    } else if prompt.starts_with("Generate a very short title") {
        PromptKind::Title
    } else {
        PromptKind::Answer
    }
}

/// Gateway answering from a per-(model, prompt kind) script.
///
/// Anything not scripted fails. Every call is recorded.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: HashMap<(String, PromptKind), String>,
    calls: Mutex<Vec<(Model, String)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(mut self, model: Model, kind: PromptKind, reply: &str) -> Self {
        self.replies
            .insert((model.to_string(), kind), reply.to_string());
        self
    }

    pub fn answer(self, model: Model, reply: &str) -> Self {
        self.script(model, PromptKind::Answer, reply)
    }

    pub fn rank(self, model: Model, reply: &str) -> Self {
        self.script(model, PromptKind::Rank, reply)
    }

    pub fn synthesize(self, model: Model, reply: &str) -> Self {
        self.script(model, PromptKind::Synthesize, reply)
    }

    pub fn title(self, model: Model, reply: &str) -> Self {
        self.script(model, PromptKind::Title, reply)
    }

    pub fn calls(&self) -> Vec<(Model, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceGateway for ScriptedGateway {
    async fn query(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        _timeout: Duration,
    ) -> Option<ModelReply> {
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        let kind = classify(&prompt);
        self.calls.lock().unwrap().push((model.clone(), prompt));
        self.replies
            .get(&(model.to_string(), kind))
            .map(ModelReply::text)
    }
}

/// Record and index stores kept in plain maps.
#[derive(Default)]
pub struct InMemoryStores {
    records: Mutex<HashMap<String, Conversation>>,
    index: Mutex<HashMap<String, ConversationMetadata>>,
}

impl InMemoryStores {
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryStores {
    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(conversation.id.clone(), conversation.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl ConversationIndex for InMemoryStores {
    async fn list(&self) -> Result<Vec<ConversationMetadata>, StoreError> {
        Ok(self.index.lock().unwrap().values().cloned().collect())
    }

    async fn upsert(&self, entry: ConversationMetadata) -> Result<(), StoreError> {
        self.index.lock().unwrap().insert(entry.id.clone(), entry);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.index.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Repository that reads through to `inner` but rejects every write.
pub struct ReadOnlyRepository {
    pub inner: Arc<InMemoryStores>,
}

#[async_trait]
impl ConversationRepository for ReadOnlyRepository {
    async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        self.inner.get(id).await
    }

    async fn save(&self, _conversation: &Conversation) -> Result<(), StoreError> {
        Err(StoreError::Other("disk unavailable".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Other("disk unavailable".to_string()))
    }
}

/// Two-model panel where every call succeeds.
pub fn healthy_gateway() -> ScriptedGateway {
    ScriptedGateway::new()
        .answer(Model::Gpt51, "answer one")
        .answer(Model::Grok4, "answer two")
        .rank(Model::Gpt51, "FINAL RANKING:\n1. Response A\n2. Response B")
        .rank(Model::Grok4, "FINAL RANKING:\n1. Response A\n2. Response B")
        .synthesize(Model::Gpt51, "final answer")
        .title(Model::Gemini25Flash, "Rust Basics")
}

/// Wire a turn use case over a two-model panel and in-memory stores.
pub fn send_message_use_case(gateway: ScriptedGateway) -> SendMessageUseCase {
    let stores = Arc::new(InMemoryStores::default());
    let conversations = Arc::new(ConversationService::new(stores.clone(), stores));
    send_message_use_case_with(gateway, conversations)
}

pub fn send_message_use_case_with(
    gateway: ScriptedGateway,
    conversations: Arc<ConversationService>,
) -> SendMessageUseCase {
    let gateway = Arc::new(gateway);
    let config = CouncilConfig::default().with_panel(vec![Model::Gpt51, Model::Grok4]);
    SendMessageUseCase::new(
        Arc::new(RunCouncilUseCase::new(gateway.clone(), config)),
        Arc::new(GenerateTitleUseCase::new(
            gateway,
            Model::Gemini25Flash,
            Duration::from_secs(30),
        )),
        conversations,
    )
}
