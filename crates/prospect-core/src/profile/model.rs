//! Profile domain model.

use serde::{Deserialize, Serialize};

/// Numeric key of a participant in the record store.
///
/// Companies are owned by a participant, so this id is what isolates one
/// user's records from another's.
pub type ParticipantId = i64;

/// The locally stored profile of a participant that may sign in.
///
/// The `identifier` is the login name the credential authority knows; every
/// other field is local data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Login identifier (opaque to this application)
    pub identifier: String,
    /// Record-store key used for data isolation
    pub participant_id: ParticipantId,
    pub first_name: String,
    pub last_name: String,
    /// Course or cohort line shown in the window header
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub email: String,
    /// Set when the participant must pick a new secret before entering
    #[serde(default)]
    pub must_rotate_credential: bool,
}

impl Profile {
    /// Returns "first last", trimmed when one part is empty.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
