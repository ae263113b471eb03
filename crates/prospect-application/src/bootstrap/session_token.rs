//! Proof of a completed startup gate.

use prospect_core::profile::Profile;
use prospect_core::session::SessionStore;
use std::sync::Arc;

/// Handed out by the bootstrap controller once it reaches `Ready`.
///
/// It can only be created inside this crate, and the navigation router
/// requires one, so the main window cannot be built without passing the gate.
#[derive(Debug)]
pub struct AuthenticatedSession {
    profile: Profile,
    session: Arc<SessionStore>,
}

impl AuthenticatedSession {
    pub(crate) fn new(profile: Profile, session: Arc<SessionStore>) -> Self {
        Self { profile, session }
    }

    /// The profile as it was when the gate opened.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}
