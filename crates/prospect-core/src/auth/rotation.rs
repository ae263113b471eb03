//! Secret rotation shared by the startup gate and the settings page.

use super::error::AuthError;
use super::outcome::RotationOutcome;
use super::policy::{PolicyViolation, SecretPolicy};
use super::service::CredentialRotator;

impl From<PolicyViolation> for AuthError {
    fn from(violation: PolicyViolation) -> Self {
        AuthError::RotationRejected {
            reason: violation.to_string(),
        }
    }
}

impl RotationOutcome {
    /// Maps the authority's reply onto the gate error taxonomy.
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            RotationOutcome::Rotated => Ok(()),
            RotationOutcome::Rejected { reason } => Err(AuthError::RotationRejected {
                reason: reason.unwrap_or_else(|| "the authority refused the new secret".to_string()),
            }),
            RotationOutcome::Unreachable { detail } => {
                tracing::warn!("[Auth] Authority unreachable during rotation: {}", detail);
                Err(AuthError::TransportUnavailable { detail })
            }
        }
    }
}

/// Checks `new_secret` against `policy`, then asks `rotator` to install it
/// for `identifier`.
///
/// A policy violation never reaches the authority.
pub async fn rotate_secret(
    policy: &SecretPolicy,
    rotator: &dyn CredentialRotator,
    identifier: &str,
    new_secret: &str,
) -> Result<(), AuthError> {
    policy.check(new_secret)?;
    rotator.rotate(identifier, new_secret).await.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        reply: RotationOutcome,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(reply: RotationOutcome) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CredentialRotator for Scripted {
        async fn rotate(&self, identifier: &str, _new_secret: &str) -> RotationOutcome {
            self.calls.lock().unwrap().push(identifier.to_string());
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn test_policy_violation_skips_authority() {
        let rotator = Scripted::new(RotationOutcome::Rotated);
        let err = rotate_secret(&SecretPolicy::default(), &rotator, "105", "weak")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::RotationRejected {
                reason: PolicyViolation::TooShort(8).to_string()
            }
        );
        assert!(rotator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_secret_is_sent_once() {
        let rotator = Scripted::new(RotationOutcome::Rotated);
        rotate_secret(&SecretPolicy::default(), &rotator, "105", "Sommer#2025")
            .await
            .unwrap();
        assert_eq!(*rotator.calls.lock().unwrap(), vec!["105".to_string()]);
    }

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(
            RotationOutcome::Rejected { reason: None }.into_result(),
            Err(AuthError::RotationRejected {
                reason: "the authority refused the new secret".to_string()
            })
        );
        assert!(matches!(
            RotationOutcome::Unreachable {
                detail: "timed out".to_string()
            }
            .into_result(),
            Err(AuthError::TransportUnavailable { .. })
        ));
    }
}
