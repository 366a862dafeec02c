//! Conversation storage adapters

pub mod file;
pub mod memory;

pub use file::{FileConversationIndex, FileConversationRepository};
pub use memory::InMemoryConversationStore;
