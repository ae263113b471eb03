//! Page controllers of the main window.
//!
//! A page is a plain state container with [`Command`]s for everything the
//! user can trigger. Commands that only change the page post a navigation
//! request; commands that touch records post an intent that the page applies
//! in `process`, which the router calls from its pump.
//!
//! [`Command`]: prospect_core::command::Command

mod activity_editor;
mod company_detail;
mod company_editor;
mod company_overview;
mod help;
mod intents;
mod settings;
mod welcome;

pub use activity_editor::{ActivityEditor, ActivityEditorMode};
pub use company_detail::{CompanyDetailPage, DetailSelection};
pub use company_editor::{CompanyEditorPage, EditorMode, EditorState};
pub use company_overview::CompanyOverviewPage;
pub use help::{HelpContent, HelpPage, LegendEntry};
pub use settings::SettingsPage;
pub use welcome::WelcomePage;

/// A message for the user after an operation, like a toast or message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Info(message) | Self::Error(message) => message,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::navigation::{NavigationRequest, Navigator};
    use crate::services::RecordServices;
    use async_trait::async_trait;
    use prospect_core::auth::{CredentialRotator, RotationOutcome};
    use prospect_infrastructure::TomlRecordStore;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    pub struct RecordingRotator {
        pub outcome: RotationOutcome,
        pub calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CredentialRotator for RecordingRotator {
        async fn rotate(&self, identifier: &str, _new_secret: &str) -> RotationOutcome {
            self.calls.lock().unwrap().push(identifier.to_string());
            self.outcome.clone()
        }
    }

    pub struct Fixture {
        pub _dir: TempDir,
        pub store: Arc<TomlRecordStore>,
        pub rotator: Arc<RecordingRotator>,
        pub services: RecordServices,
    }

    pub fn fixture() -> Fixture {
        fixture_with(RotationOutcome::Rotated)
    }

    pub fn fixture_with(outcome: RotationOutcome) -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(TomlRecordStore::new(dir.path().join("records.toml")));
        let rotator = Arc::new(RecordingRotator {
            outcome,
            calls: Mutex::new(Vec::new()),
        });
        let services = RecordServices::from_store(store.clone(), rotator.clone());
        Fixture {
            _dir: dir,
            store,
            rotator,
            services,
        }
    }

    pub fn navigator() -> (Navigator, mpsc::UnboundedReceiver<NavigationRequest>) {
        Navigator::channel()
    }
}
