//! Application layer for Prospect.
//!
//! Coordinates the domain traits into the two things the desktop shell runs:
//! the startup authentication gate and the page router of the main window.

pub mod bootstrap;
pub mod navigation;
pub mod pages;
pub mod services;

pub use bootstrap::{AuthenticatedSession, BootstrapController, BootstrapOutcome, GateState};
pub use navigation::{NavigationRouter, PageKind};
pub use services::RecordServices;
