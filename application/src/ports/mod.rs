//! Ports (interfaces) for external dependencies
//!
//! These traits define how the application layer interacts with
//! model providers, storage and the presentation layer.

pub mod conversation_store;
pub mod llm_gateway;
pub mod progress;
