//! Successful model reply

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a backend returned for one successful request
///
/// Failure is never represented here: an unsuccessful call is simply the
/// absence of a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelReply {
    /// Answer text (empty when the backend omitted it)
    pub content: String,
    /// Opaque reasoning metadata, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_details: Option<Value>,
}

impl ModelReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            reasoning_details: None,
        }
    }

    pub fn with_reasoning(mut self, details: Value) -> Self {
        self.reasoning_details = Some(details);
        self
    }
}
