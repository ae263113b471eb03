//! Participant profile domain module.
//!
//! # Module Structure
//!
//! - `model`: Profile domain model
//! - `repository`: Lookup trait for the local profile store

mod model;
mod repository;

pub use model::{ParticipantId, Profile};
pub use repository::ProfileRepository;
