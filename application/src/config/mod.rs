//! Application-level configuration.
//!
//! [`CouncilConfig`] carries everything a council run needs to know about
//! which models to call and how long to wait for them.

pub mod council_config;

pub use council_config::CouncilConfig;
