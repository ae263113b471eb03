//! Error taxonomy of the bootstrap gates.

use thiserror::Error;

/// Everything a login or rotation attempt can report back to the user.
///
/// None of these are fatal: the gate stays where it was and the user may try
/// again. Leaving the application is always an explicit cancellation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The authority refused the identifier/secret pair.
    #[error("{}", .reason.as_deref().unwrap_or("identifier or secret is incorrect"))]
    CredentialRejected { reason: Option<String> },

    /// The authority could not be reached.
    #[error("the authentication service is not reachable: {detail}")]
    TransportUnavailable { detail: String },

    /// The authority accepted an identity that has no local profile.
    #[error("no local profile exists for '{identifier}'; the profile store is out of sync")]
    ProfileInconsistency { identifier: String },

    /// The local profile store could not be queried.
    #[error("the profile store could not be read: {detail}")]
    ProfileStoreUnavailable { detail: String },

    /// The new secret was refused, locally or by the authority.
    #[error("the new secret was not accepted: {reason}")]
    RotationRejected { reason: String },

    /// A login attempt is already waiting for the authority.
    #[error("a login attempt is already in progress")]
    AttemptInFlight,

    /// The operation does not apply to the gate's current state.
    #[error("operation '{operation}' is not valid in state {state}")]
    InvalidGateState {
        operation: &'static str,
        state: String,
    },
}

impl AuthError {
    /// Returns true when the user can simply try again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidGateState { .. })
    }
}
