//! Presentation surfaces of the two startup modals.
//!
//! A surface shows its modal, waits for the user and reports what they did.
//! It never talks to the authority itself.

use async_trait::async_trait;
use prospect_core::auth::AuthError;
use prospect_core::profile::Profile;
use std::fmt;

/// What the user did on the login modal.
pub enum LoginAction {
    Submit { identifier: String, secret: String },
    Cancel,
}

impl fmt::Debug for LoginAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit { identifier, .. } => f
                .debug_struct("Submit")
                .field("identifier", identifier)
                .field("secret", &"<redacted>")
                .finish(),
            Self::Cancel => f.write_str("Cancel"),
        }
    }
}

/// What the user did on the rotation modal.
pub enum RotationAction {
    Submit { new_secret: String },
    Cancel,
}

impl fmt::Debug for RotationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit { .. } => f.write_str("Submit { new_secret: <redacted> }"),
            Self::Cancel => f.write_str("Cancel"),
        }
    }
}

#[async_trait]
pub trait LoginSurface: Send {
    /// Presents the login modal. `feedback` is the error of the previous
    /// attempt, if there was one.
    async fn present(&mut self, feedback: Option<&AuthError>) -> LoginAction;
}

#[async_trait]
pub trait RotationSurface: Send {
    /// Presents the rotation modal for the signed-in `profile`.
    async fn present(&mut self, profile: &Profile, feedback: Option<&AuthError>) -> RotationAction;
}
