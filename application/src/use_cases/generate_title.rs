//! Generate Title use case

use crate::ports::llm_gateway::InferenceGateway;
use council_domain::{ChatMessage, DEFAULT_TITLE, Model, PromptTemplate, Question, normalize_title};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Produces a short conversation title from the first question.
///
/// Never fails: an absent reply yields the default title.
pub struct GenerateTitleUseCase {
    gateway: Arc<dyn InferenceGateway>,
    model: Model,
    timeout: Duration,
}

impl GenerateTitleUseCase {
    pub fn new(gateway: Arc<dyn InferenceGateway>, model: Model, timeout: Duration) -> Self {
        Self {
            gateway,
            model,
            timeout,
        }
    }

    pub async fn execute(&self, question: &Question) -> String {
        let messages = [ChatMessage::user(PromptTemplate::title_prompt(
            question.content(),
        ))];

        match self.gateway.query(&self.model, &messages, self.timeout).await {
            Some(reply) => {
                let title = normalize_title(&reply.content);
                debug!("Generated title: {}", title);
                title
            }
            None => {
                warn!("Title model {} did not respond", self.model);
                DEFAULT_TITLE.to_string()
            }
        }
    }
}
