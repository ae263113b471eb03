//! Settings page: voluntary secret rotation.

use super::Notice;
use super::intents::IntentQueue;
use crate::services::RecordServices;
use prospect_core::auth::{AuthError, rotate_secret};
use prospect_core::command::{Command, RequeryNotifier};
use prospect_core::session::SessionStore;
use std::sync::Arc;

enum SettingsIntent {
    ChangeSecret(String),
}

pub struct SettingsPage {
    services: RecordServices,
    session: Arc<SessionStore>,
    intents: IntentQueue<SettingsIntent>,
    requery: RequeryNotifier,
    notice: Option<Notice>,
    /// Takes the new secret; refuses an empty one.
    pub change_secret: Command<str>,
}

impl SettingsPage {
    pub fn new(services: RecordServices, session: Arc<SessionStore>) -> Self {
        let intents = IntentQueue::new();
        let requery = RequeryNotifier::new();
        let poster = intents.poster();

        let change_secret = Command::<str>::new("change-secret", move |secret| {
            poster.post(SettingsIntent::ChangeSecret(secret.to_string()))
        })
        .with_guard(|secret| !secret.is_empty())
        .with_notifier(requery.clone());

        Self {
            services,
            session,
            intents,
            requery,
            notice: None,
            change_secret,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub(crate) async fn activated(&mut self) {
        self.notice = None;
    }

    pub(crate) async fn process(&mut self) {
        for intent in self.intents.drain() {
            match intent {
                SettingsIntent::ChangeSecret(secret) => {
                    self.notice = Some(match self.rotate(&secret).await {
                        Ok(()) => Notice::Info("Your secret was changed.".to_string()),
                        Err(e) => Notice::Error(e.to_string()),
                    });
                }
            }
        }
        self.requery.notify();
    }

    async fn rotate(&self, new_secret: &str) -> Result<(), AuthError> {
        let profile = self
            .session
            .current()
            .ok_or_else(|| AuthError::InvalidGateState {
                operation: "change_secret",
                state: "signed out".to_string(),
            })?;

        rotate_secret(
            &self.services.policy,
            self.services.rotator.as_ref(),
            &profile.identifier,
            new_secret,
        )
        .await?;

        self.session.clear_rotation_flag();
        tracing::info!("[Settings] Secret changed for '{}'", profile.identifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{fixture, fixture_with};
    use prospect_core::auth::RotationOutcome;
    use prospect_core::profile::Profile;

    fn signed_in(must_rotate: bool) -> Arc<SessionStore> {
        let session = Arc::new(SessionStore::new());
        session.sign_in(Profile {
            identifier: "105".to_string(),
            participant_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            course: String::new(),
            email: String::new(),
            must_rotate_credential: must_rotate,
        });
        session
    }

    #[tokio::test]
    async fn test_change_secret_clears_flag() {
        let fx = fixture();
        let session = signed_in(true);
        let mut page = SettingsPage::new(fx.services.clone(), session.clone());

        page.change_secret.invoke("Sommer#2025").unwrap();
        page.process().await;

        assert_eq!(page.notice().map(Notice::is_error), Some(false));
        assert!(!session.current().unwrap().must_rotate_credential);
        assert_eq!(*fx.rotator.calls.lock().unwrap(), vec!["105".to_string()]);
    }

    #[tokio::test]
    async fn test_weak_secret_is_refused_locally() {
        let fx = fixture();
        let mut page = SettingsPage::new(fx.services.clone(), signed_in(false));

        page.change_secret.invoke("weak").unwrap();
        page.process().await;

        assert!(page.notice().unwrap().is_error());
        assert!(fx.rotator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_secret_is_blocked_by_guard() {
        let fx = fixture();
        let page = SettingsPage::new(fx.services.clone(), signed_in(false));
        assert!(!page.change_secret.can_invoke(""));
        assert!(page.change_secret.invoke("").is_err());
    }

    #[tokio::test]
    async fn test_remote_refusal_keeps_flag() {
        let fx = fixture_with(RotationOutcome::Rejected {
            reason: Some("secret reused".to_string()),
        });
        let session = signed_in(true);
        let mut page = SettingsPage::new(fx.services.clone(), session.clone());

        page.change_secret.invoke("Sommer#2025").unwrap();
        page.process().await;

        assert!(page.notice().unwrap().message().contains("secret reused"));
        assert!(session.current().unwrap().must_rotate_credential);
    }

    #[tokio::test]
    async fn test_unreachable_authority_reads_like_the_gate() {
        let fx = fixture_with(RotationOutcome::Unreachable {
            detail: "timed out".to_string(),
        });
        let mut page = SettingsPage::new(fx.services.clone(), signed_in(true));

        page.change_secret.invoke("Sommer#2025").unwrap();
        page.process().await;

        let expected = AuthError::TransportUnavailable {
            detail: "timed out".to_string(),
        };
        assert_eq!(page.notice().unwrap().message(), expected.to_string());
    }
}
