//! Company editor: create a company or update an existing one.

use super::Notice;
use super::intents::IntentQueue;
use crate::navigation::{NavigationRequest, Navigator};
use crate::services::RecordServices;
use prospect_core::command::{Command, RequeryNotifier};
use prospect_core::company::{Company, CompanyDetails, CompanyId};
use prospect_core::error::{ProspectError, Result};
use prospect_core::profile::ParticipantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(CompanyId),
}

/// What the save guard looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorState {
    pub mode: EditorMode,
    /// Whether the edited company has been loaded into the form
    pub loaded: bool,
}

enum EditorIntent {
    Save,
}

pub struct CompanyEditorPage {
    services: RecordServices,
    owner: ParticipantId,
    mode: EditorMode,
    loaded: Option<Company>,
    navigator: Navigator,
    intents: IntentQueue<EditorIntent>,
    requery: RequeryNotifier,
    notice: Option<Notice>,
    pub form: CompanyDetails,
    pub save: Command<EditorState>,
    /// Leaves the editor without saving.
    pub cancel: Command,
}

impl CompanyEditorPage {
    pub fn new(services: RecordServices, owner: ParticipantId, navigator: Navigator, mode: EditorMode) -> Self {
        let intents = IntentQueue::new();
        let requery = RequeryNotifier::new();

        let poster = intents.poster();
        let save = Command::new("save-company", move |_: &EditorState| poster.post(EditorIntent::Save))
            .with_guard(|state: &EditorState| state.mode == EditorMode::Create || state.loaded)
            .with_notifier(requery.clone());

        let back = navigator.clone();
        let cancel: Command = Command::new("cancel-editor", move |_| back.request(NavigationRequest::Welcome))
            .with_notifier(requery.clone());

        Self {
            services,
            owner,
            mode,
            loaded: None,
            navigator,
            intents,
            requery,
            notice: None,
            form: CompanyDetails::default(),
            save,
            cancel,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn state(&self) -> EditorState {
        EditorState {
            mode: self.mode,
            loaded: self.loaded.is_some(),
        }
    }

    /// Caption of the save affordance.
    pub fn save_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Save",
            EditorMode::Edit(_) => "Update",
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub(crate) async fn activated(&mut self) {
        let EditorMode::Edit(id) = self.mode else {
            return;
        };
        match self.load(id).await {
            Ok(company) => {
                self.form = company.details.clone();
                self.loaded = Some(company);
            }
            Err(e) => {
                tracing::warn!("[Editor] Cannot edit company {}: {}", id, e);
                self.loaded = None;
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
        self.requery.notify();
    }

    async fn load(&self, id: CompanyId) -> Result<Company> {
        match self.services.companies.find_by_id(id).await? {
            Some(company) if company.owner == self.owner => Ok(company),
            _ => Err(ProspectError::not_found("Company", id.to_string())),
        }
    }

    pub(crate) async fn process(&mut self) {
        for intent in self.intents.drain() {
            match intent {
                EditorIntent::Save => {
                    if let Err(e) = self.save_form().await {
                        tracing::warn!("[Editor] Save failed: {}", e);
                        self.notice = Some(Notice::Error(e.to_string()));
                    }
                }
            }
        }
        self.requery.notify();
    }

    async fn save_form(&mut self) -> Result<()> {
        if self.form.name.trim().is_empty() {
            self.notice = Some(Notice::Error("The company name is required.".to_string()));
            return Ok(());
        }

        match self.mode {
            EditorMode::Create => {
                let company = self.services.companies.add(self.owner, &self.form).await?;
                tracing::info!("[Editor] Added company {}", company.id);
                self.form = CompanyDetails::default();
                self.notice = Some(Notice::Info(format!("'{}' was added.", company.details.name)));
            }
            EditorMode::Edit(id) => {
                let Some(mut company) = self.loaded.clone() else {
                    return Err(ProspectError::not_found("Company", id.to_string()));
                };
                company.details = self.form.clone();
                self.services.companies.update(&company).await?;
                self.loaded = Some(company);
                self.notice = Some(Notice::Info("The company was updated.".to_string()));
                self.navigator.request(NavigationRequest::CompanyDetailFor(id));
            }
        }
        Ok(())
    }
}
