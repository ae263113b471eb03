//! Session domain module.
//!
//! Holds the profile of the participant who passed the login gate.

mod store;

pub use store::SessionStore;
