//! Shared handler state

use council_application::{ConversationService, SendMessageUseCase};
use std::sync::Arc;

/// State shared by every HTTP handler
#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConversationService>,
    pub messages: Arc<SendMessageUseCase>,
}

impl AppState {
    pub fn new(conversations: Arc<ConversationService>, messages: Arc<SendMessageUseCase>) -> Self {
        Self {
            conversations,
            messages,
        }
    }
}
