//! Domain layer for Prospect.
//!
//! Models, repository traits and the process-wide session holder. Nothing in
//! here knows how records are stored or how pages are drawn.

pub mod activity;
pub mod auth;
pub mod command;
pub mod company;
pub mod config;
pub mod error;
pub mod profile;
pub mod session;
pub mod status;

// Re-export common error type
pub use error::ProspectError;
