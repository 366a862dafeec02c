//! OpenRouter chat-completions wire types

use council_domain::{ChatMessage, ModelReply};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /chat/completions`
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

/// Response body; only the fields the council reads
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_details: Option<Value>,
}

impl CompletionResponse {
    /// Reply carried by the first choice.
    ///
    /// A choice without content counts as an empty answer; a response with
    /// no choices at all has no reply.
    pub fn into_reply(self) -> Option<ModelReply> {
        let message = self.choices.into_iter().next()?.message;
        let reply = ModelReply::text(message.content.unwrap_or_default());
        Some(match message.reasoning_details {
            Some(details) if !details.is_null() => reply.with_reasoning(details),
            _ => reply,
        })
    }
}
