//! Send Message use case
//!
//! One conversation turn: record the user's question, run the council,
//! title the conversation on its first turn, and record the answer.

use crate::ports::conversation_store::StoreError;
use crate::use_cases::generate_title::GenerateTitleUseCase;
use crate::use_cases::manage_conversations::ConversationService;
use crate::use_cases::run_council::RunCouncilUseCase;
use council_domain::{CouncilEvent, CouncilOutcome, Question};
use futures::stream::BoxStream;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can end a turn before it produces an answer
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Conversation not found")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for one question/answer turn in a conversation
pub struct SendMessageUseCase {
    pub(crate) council: Arc<RunCouncilUseCase>,
    pub(crate) titles: Arc<GenerateTitleUseCase>,
    pub(crate) conversations: Arc<ConversationService>,
}

impl SendMessageUseCase {
    pub fn new(
        council: Arc<RunCouncilUseCase>,
        titles: Arc<GenerateTitleUseCase>,
        conversations: Arc<ConversationService>,
    ) -> Self {
        Self {
            council,
            titles,
            conversations,
        }
    }

    /// Run a whole turn and return the council outcome in one piece.
    ///
    /// On the first turn of a conversation the generated title is stored and
    /// also reported in `metadata.title`.
    pub async fn execute(
        &self,
        conversation_id: &str,
        question: &Question,
    ) -> Result<CouncilOutcome, MessageError> {
        let is_first = self.first_turn(conversation_id).await?;

        self.conversations
            .add_user_message(conversation_id, question.content())
            .await?
            .ok_or_else(|| MessageError::NotFound(conversation_id.to_string()))?;

        let title = if is_first {
            let title = self.titles.execute(question).await;
            self.conversations
                .update_title(conversation_id, &title)
                .await?;
            Some(title)
        } else {
            None
        };

        let mut outcome = self.council.execute(question).await;

        self.conversations
            .add_assistant_message(
                conversation_id,
                outcome.stage1.clone(),
                outcome.stage2.clone(),
                outcome.stage3.clone(),
            )
            .await?
            .ok_or_else(|| MessageError::NotFound(conversation_id.to_string()))?;

        outcome.metadata.title = title;
        info!("Completed turn in conversation {}", conversation_id);
        Ok(outcome)
    }

    /// Run a turn as a stream of progress events.
    ///
    /// An unknown conversation is reported before the stream starts. After
    /// that every failure surfaces as a single `error` event that ends the
    /// stream.
    pub async fn stream(
        self: &Arc<Self>,
        conversation_id: &str,
        question: Question,
    ) -> Result<BoxStream<'static, CouncilEvent>, MessageError> {
        let is_first = self.first_turn(conversation_id).await?;
        Ok(super::stream_message::council_events(
            Arc::clone(self),
            conversation_id.to_string(),
            question,
            is_first,
        ))
    }

    async fn first_turn(&self, conversation_id: &str) -> Result<bool, MessageError> {
        let conversation = self
            .conversations
            .get(conversation_id)
            .await?
            .ok_or_else(|| MessageError::NotFound(conversation_id.to_string()))?;
        Ok(conversation.is_empty())
    }
}
