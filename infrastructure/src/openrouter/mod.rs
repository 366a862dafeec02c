//! OpenRouter adapter
//!
//! Implements [`InferenceGateway`](council_application::InferenceGateway)
//! over the OpenRouter chat-completions HTTP API.

pub mod gateway;
pub mod protocol;

pub use gateway::OpenRouterGateway;
