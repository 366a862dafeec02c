//! Council domain
//!
//! This module contains the core concepts of a council run.
//!
//! # Stages
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Stage 1: Collect     every panel member answers in parallel   │
//! │                          ↓                                     │
//! │  Stage 2: Rank        answers anonymized as "Response A..."    │
//! │                       every panel member critiques and ranks   │
//! │                          ↓                                     │
//! │  Aggregate            mean position per model, best first      │
//! │                          ↓                                     │
//! │  Stage 3: Synthesize  chairman (then fallbacks, in order)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failure degrades instead of aborting: a model that does not answer is
//! simply absent, and the run always ends with a [`Stage3Result`], using a
//! fixed sentinel when no answer could be produced.

pub mod aggregation;
pub mod event;
pub mod label;
pub mod parsing;
pub mod stage;
pub mod value_objects;

// Re-export main types
pub use aggregation::aggregate_rankings;
pub use event::{CouncilEvent, TitlePayload};
pub use label::{LabelMap, MAX_LABELS};
pub use parsing::{FINAL_RANKING_MARKER, parse_ranking};
pub use stage::{CouncilRun, CouncilStage};
pub use value_objects::{
    AggregateRanking, CouncilMetadata, CouncilOutcome, Stage1Result, Stage2Result, Stage3Result,
};
