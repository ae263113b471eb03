//! Startup authentication gate.
//!
//! # Module Structure
//!
//! - `state`: Gate states
//! - `surface`: Traits the presentation layer implements for the two modals
//! - `session_token`: Proof that the gate was passed
//! - `controller`: The state machine itself

mod controller;
mod session_token;
mod state;
mod surface;

pub use controller::{BootstrapController, BootstrapOutcome};
pub use session_token::AuthenticatedSession;
pub use state::GateState;
pub use surface::{LoginAction, LoginSurface, RotationAction, RotationSurface};
