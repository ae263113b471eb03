//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `outcome`: Results of a validation or rotation round-trip
//! - `service`: Traits for the remote credential authority
//! - `policy`: Local strength policy for new secrets
//! - `rotation`: Policy check plus authority round-trip for a new secret
//! - `error`: Gate-level error taxonomy

mod error;
mod outcome;
mod policy;
mod rotation;
mod service;

pub use error::AuthError;
pub use outcome::{RotationOutcome, ValidationOutcome};
pub use policy::{PolicyViolation, SecretPolicy};
pub use rotation::rotate_secret;
pub use service::{CredentialRotator, CredentialValidator};
