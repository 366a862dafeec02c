//! Conversation entities

use crate::council::{Stage1Result, Stage2Result, Stage3Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to a conversation before its first turn is titled.
pub const DEFAULT_TITLE: &str = "New Conversation";

/// A message in a conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User {
        content: String,
    },
    Assistant {
        stage1: Vec<Stage1Result>,
        stage2: Vec<Stage2Result>,
        stage3: Stage3Result,
    },
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn assistant(
        stage1: Vec<Stage1Result>,
        stage2: Vec<Stage2Result>,
        stage3: Stage3Result,
    ) -> Self {
        Message::Assistant {
            stage1,
            stage2,
            stage3,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Message::User { .. })
    }
}

/// A conversation and its full message log (Entity)
///
/// Messages are append-only; the only other mutation is the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation with the default title.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
        }
    }

    /// True until the first message has been appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Listing projection of this conversation.
    pub fn metadata(&self) -> ConversationMetadata {
        ConversationMetadata {
            id: self.id.clone(),
            created_at: self.created_at,
            title: self.title.clone(),
            message_count: self.messages.len(),
        }
    }
}

/// Listing-index projection of a [`Conversation`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMetadata {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub message_count: usize,
}

/// Sort listing entries newest first.
pub fn sort_newest_first(entries: &mut [ConversationMetadata]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_conversation() {
        let conversation = Conversation::new("abc", at(0));
        assert_eq!(conversation.title, DEFAULT_TITLE);
        assert!(conversation.is_empty());
        assert_eq!(conversation.metadata().message_count, 0);
    }

    #[test]
    fn test_metadata_tracks_message_count() {
        let mut conversation = Conversation::new("abc", at(0));
        conversation.push(Message::user("hi"));
        conversation.push(Message::assistant(
            vec![],
            vec![],
            Stage3Result::new(Model::Gpt51, "hello"),
        ));

        let meta = conversation.metadata();
        assert_eq!(meta.id, "abc");
        assert_eq!(meta.message_count, 2);
    }

    #[test]
    fn test_message_wire_format() {
        let json = serde_json::to_value(Message::user("hello")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");

        let assistant = Message::assistant(
            vec![Stage1Result::new(Model::Grok4, "a")],
            vec![],
            Stage3Result::new(Model::Gpt51, "b"),
        );
        let json = serde_json::to_value(assistant).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["stage1"][0]["model"], "x-ai/grok-4");
        assert_eq!(json["stage3"]["response"], "b");
    }

    #[test]
    fn test_conversation_wire_format() {
        let conversation = Conversation::new("abc", at(0));
        let json = serde_json::to_value(&conversation).unwrap();
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert!(json["messages"].as_array().unwrap().is_empty());

        let meta = serde_json::to_value(conversation.metadata()).unwrap();
        assert_eq!(meta["messageCount"], 0);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![
            Conversation::new("old", at(10)).metadata(),
            Conversation::new("new", at(30)).metadata(),
            Conversation::new("mid", at(20)).metadata(),
        ];
        sort_newest_first(&mut entries);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
