//! Backend session types: outgoing chat messages and incoming replies.

pub mod entities;
pub mod reply;

pub use entities::{ChatMessage, Role};
pub use reply::ModelReply;
