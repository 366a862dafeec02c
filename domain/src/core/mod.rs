//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: inference backend identifiers
//! - [`question::Question`]: a validated question to pose to the council
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
