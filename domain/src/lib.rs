//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed panel of models answers a question, ranks the anonymized answers
//! of the whole panel, and a chairman model synthesizes the final answer:
//!
//! - **Labels**: answers are shown to judges as `Response A`, `Response B`, ...
//! - **Rank parsing**: tolerant extraction of a judge's ordering from free text
//! - **Aggregation**: mean position per model, best first
//!
//! ## Conversation
//!
//! An append-only log of user questions and council answers, plus a
//! lightweight metadata projection for listings.

pub mod config;
pub mod conversation;
pub mod core;
pub mod council;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use conversation::{
    Conversation, ConversationMetadata, DEFAULT_TITLE, Message, normalize_title,
    sort_newest_first,
};
pub use core::{error::DomainError, model::Model, question::Question};
pub use council::{
    AggregateRanking, CouncilEvent, CouncilMetadata, CouncilOutcome, CouncilRun, CouncilStage,
    LabelMap, MAX_LABELS, Stage1Result, Stage2Result, Stage3Result, TitlePayload,
    aggregate_rankings, parse_ranking,
};
pub use prompt::PromptTemplate;
pub use session::{ChatMessage, ModelReply, Role};
