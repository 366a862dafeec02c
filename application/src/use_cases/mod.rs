//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod fan_out;
pub mod generate_title;
pub mod manage_conversations;
pub mod run_council;
pub mod send_message;
mod stream_message;

#[cfg(test)]
pub(crate) mod test_support;
