//! LLM Gateway port
//!
//! Defines the interface for sending one chat-completion request to a model.

use async_trait::async_trait;
use council_domain::{ChatMessage, Model, ModelReply};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur inside a gateway adapter
///
/// These never cross the port: [`InferenceGateway::query`] logs them and
/// reports an absent reply instead.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway for model inference
///
/// This port defines how the application layer talks to the model provider.
/// Implementations (adapters) live in the infrastructure layer.
///
/// A failed call of any kind (network error, non-success status, timeout,
/// malformed body) yields `None`. Callers treat an absent reply as "this
/// model did not answer" and carry on with the rest of the panel.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    async fn query(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Option<ModelReply>;
}
