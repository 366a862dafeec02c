//! Conversation domain
//!
//! A [`Conversation`] is the full, append-only message log for one thread.
//! [`ConversationMetadata`] is the cheap listing projection of it; the two
//! are stored separately and kept in sync by the application layer.

pub mod entities;
pub mod title;

pub use entities::{
    Conversation, ConversationMetadata, DEFAULT_TITLE, Message, sort_newest_first,
};
pub use title::normalize_title;
