//! Outcome types produced by the credential authority adapters.

use serde::{Deserialize, Serialize};

/// Result of a single login validation round-trip.
///
/// Transient: produced per attempt and consumed immediately by the bootstrap
/// gate. `AcceptedRotationRequired` is a successful authentication; the
/// identity is known, only the secret is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ValidationOutcome {
    Accepted,
    AcceptedRotationRequired,
    Rejected {
        /// Human-readable reason from the authority, if it sent one
        reason: Option<String>,
    },
    Unreachable {
        /// Transport-level detail for logs
        detail: String,
    },
}

impl ValidationOutcome {
    /// Returns true for both accepting variants.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted | Self::AcceptedRotationRequired)
    }

    /// Returns true when the authority asked for a new secret.
    pub fn requires_rotation(&self) -> bool {
        matches!(self, Self::AcceptedRotationRequired)
    }
}

/// Result of a credential rotation round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RotationOutcome {
    Rotated,
    Rejected { reason: Option<String> },
    Unreachable { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepting_variants() {
        assert!(ValidationOutcome::Accepted.is_accepted());
        assert!(ValidationOutcome::AcceptedRotationRequired.is_accepted());
        assert!(ValidationOutcome::AcceptedRotationRequired.requires_rotation());
        assert!(!ValidationOutcome::Accepted.requires_rotation());
        assert!(!ValidationOutcome::Rejected { reason: None }.is_accepted());
        assert!(
            !ValidationOutcome::Unreachable {
                detail: "timeout".into()
            }
            .is_accepted()
        );
    }
}
