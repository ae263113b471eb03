//! Credential authority traits.
//!
//! Adapters translate every transport failure into an `Unreachable` outcome;
//! nothing raw from the network layer crosses these traits.

use super::outcome::{RotationOutcome, ValidationOutcome};
use async_trait::async_trait;

/// Validates a login identifier and secret against the remote authority.
///
/// Implementations perform exactly one round-trip and never retry.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    async fn validate(&self, identifier: &str, secret: &str) -> ValidationOutcome;
}

/// Replaces the secret of an already authenticated identifier.
#[async_trait]
pub trait CredentialRotator: Send + Sync {
    async fn rotate(&self, identifier: &str, new_secret: &str) -> RotationOutcome;
}
