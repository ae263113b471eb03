//! Process-wide holder of the authenticated profile.

use crate::profile::Profile;
use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};

static GLOBAL_SESSION: Lazy<Arc<SessionStore>> = Lazy::new(|| Arc::new(SessionStore::new()));

/// The "who is signed in" state of the running application.
///
/// `sign_in` and `sign_out` are the only operations that replace the held
/// profile. `clear_rotation_flag` touches nothing but the flag.
///
/// One instance lives for the process lifetime ([`SessionStore::global`]),
/// created on first access. Components never reach for the global
/// themselves; the composition root hands them an `Arc<SessionStore>`.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Profile>>,
}

impl SessionStore {
    /// Creates an empty, signed-out store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide store, creating it on first use.
    pub fn global() -> Arc<SessionStore> {
        GLOBAL_SESSION.clone()
    }

    /// Records `profile` as the signed-in participant.
    pub fn sign_in(&self, profile: Profile) {
        tracing::info!("[Session] Signed in: {}", profile.identifier);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(profile);
    }

    /// Forgets the signed-in participant.
    pub fn sign_out(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(profile) = current.take() {
            tracing::info!("[Session] Signed out: {}", profile.identifier);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns a snapshot of the signed-in profile.
    pub fn current(&self) -> Option<Profile> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Marks the held profile's secret as fresh after a successful rotation.
    ///
    /// Returns false when nobody is signed in.
    pub fn clear_rotation_flag(&self) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match current.as_mut() {
            Some(profile) => {
                profile.must_rotate_credential = false;
                true
            }
            None => false,
        }
    }
}
