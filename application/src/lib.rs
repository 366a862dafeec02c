//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilConfig;
pub use ports::{
    conversation_store::{ConversationIndex, ConversationRepository, StoreError},
    llm_gateway::{GatewayError, InferenceGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::fan_out::query_all;
pub use use_cases::generate_title::GenerateTitleUseCase;
pub use use_cases::manage_conversations::ConversationService;
pub use use_cases::run_council::RunCouncilUseCase;
pub use use_cases::send_message::{MessageError, SendMessageUseCase};
