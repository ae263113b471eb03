//! Company detail: one company, its activity history and the activity form.

use super::Notice;
use super::activity_editor::{ActivityEditor, ActivityEditorMode};
use super::intents::IntentQueue;
use crate::navigation::{NavigationRequest, Navigator};
use crate::services::RecordServices;
use prospect_core::activity::{Activity, ActivityId};
use prospect_core::command::{Command, RequeryNotifier};
use prospect_core::company::{Company, CompanyId};
use prospect_core::error::Result;
use prospect_core::profile::ParticipantId;

/// Snapshot of what the detail page has selected, passed to its commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailSelection {
    pub company: Option<CompanyId>,
    pub activity: Option<ActivityId>,
    /// Mode of the open activity form, if any
    pub editor: Option<ActivityEditorMode>,
}

enum DetailIntent {
    Refresh,
    OpenActivityEditor(Option<ActivityId>),
    SaveActivity,
    DeleteActivity,
    DiscardActivity,
    DeleteCompany(CompanyId),
}

pub struct CompanyDetailPage {
    services: RecordServices,
    owner: ParticipantId,
    preselect: Option<CompanyId>,
    loaded: bool,
    companies: Vec<Company>,
    selected_company: Option<Company>,
    activities: Vec<Activity>,
    selected_activity: Option<ActivityId>,
    activity_editor: Option<ActivityEditor>,
    intents: IntentQueue<DetailIntent>,
    requery: RequeryNotifier,
    notice: Option<Notice>,
    pub refresh: Command,
    pub edit_company: Command<DetailSelection>,
    /// Callers confirm with the user before invoking; activities go too.
    pub delete_company: Command<DetailSelection>,
    pub add_activity: Command<DetailSelection>,
    pub edit_activity: Command<DetailSelection>,
    pub save_activity: Command<DetailSelection>,
    pub delete_activity: Command<DetailSelection>,
    pub discard_activity: Command<DetailSelection>,
}

fn has_company(selection: &DetailSelection) -> bool {
    selection.company.is_some()
}

impl CompanyDetailPage {
    /// `preselect` picks the company shown after the first load.
    pub fn new(
        services: RecordServices,
        owner: ParticipantId,
        navigator: Navigator,
        preselect: Option<CompanyId>,
    ) -> Self {
        let intents = IntentQueue::new();
        let requery = RequeryNotifier::new();

        let poster = intents.poster();
        let refresh: Command = Command::new("refresh", move |_| poster.post(DetailIntent::Refresh))
            .with_notifier(requery.clone());

        let edit_company = Command::new("edit-company", move |s: &DetailSelection| {
            if let Some(id) = s.company {
                navigator.request(NavigationRequest::CompanyEditorFor(id));
            }
        })
        .with_guard(has_company)
        .with_notifier(requery.clone());

        let poster = intents.poster();
        let delete_company = Command::new("delete-company", move |s: &DetailSelection| {
            if let Some(id) = s.company {
                poster.post(DetailIntent::DeleteCompany(id));
            }
        })
        .with_guard(has_company)
        .with_notifier(requery.clone());

        let poster = intents.poster();
        let add_activity = Command::new("add-activity", move |_: &DetailSelection| {
            poster.post(DetailIntent::OpenActivityEditor(None))
        })
        .with_guard(has_company)
        .with_notifier(requery.clone());

        let poster = intents.poster();
        let edit_activity = Command::new("edit-activity", move |s: &DetailSelection| {
            if let Some(id) = s.activity {
                poster.post(DetailIntent::OpenActivityEditor(Some(id)));
            }
        })
        .with_guard(|s: &DetailSelection| s.activity.is_some())
        .with_notifier(requery.clone());

        let poster = intents.poster();
        let save_activity = Command::new("save-activity", move |_: &DetailSelection| {
            poster.post(DetailIntent::SaveActivity)
        })
        .with_guard(|s: &DetailSelection| s.company.is_some() && s.editor.is_some())
        .with_notifier(requery.clone());

        let poster = intents.poster();
        let delete_activity = Command::new("delete-activity", move |_: &DetailSelection| {
            poster.post(DetailIntent::DeleteActivity)
        })
        .with_guard(|s: &DetailSelection| matches!(s.editor, Some(ActivityEditorMode::Edit(_))))
        .with_notifier(requery.clone());

        let poster = intents.poster();
        let discard_activity = Command::new("discard-activity", move |_: &DetailSelection| {
            poster.post(DetailIntent::DiscardActivity)
        })
        .with_guard(|s: &DetailSelection| s.editor.is_some())
        .with_notifier(requery.clone());

        Self {
            services,
            owner,
            preselect,
            loaded: false,
            companies: Vec::new(),
            selected_company: None,
            activities: Vec::new(),
            selected_activity: None,
            activity_editor: None,
            intents,
            requery,
            notice: None,
            refresh,
            edit_company,
            delete_company,
            add_activity,
            edit_activity,
            save_activity,
            delete_activity,
            discard_activity,
        }
    }

    pub fn selection(&self) -> DetailSelection {
        DetailSelection {
            company: self.selected_company.as_ref().map(|c| c.id),
            activity: self.selected_activity,
            editor: self.activity_editor.as_ref().map(ActivityEditor::mode),
        }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn selected_company(&self) -> Option<&Company> {
        self.selected_company.as_ref()
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity_editor(&self) -> Option<&ActivityEditor> {
        self.activity_editor.as_ref()
    }

    pub fn activity_editor_mut(&mut self) -> Option<&mut ActivityEditor> {
        self.activity_editor.as_mut()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Selects a company and loads its activities.
    pub async fn select_company(&mut self, id: Option<CompanyId>) {
        self.selected_company = id.and_then(|id| self.companies.iter().find(|c| c.id == id).cloned());
        self.selected_activity = None;
        self.activity_editor = None;
        self.load_activities().await;
        self.requery.notify();
    }

    pub fn select_activity(&mut self, id: Option<ActivityId>) {
        self.selected_activity = id.filter(|id| self.activities.iter().any(|a| a.id == *id));
        self.requery.notify();
    }

    /// Reloads the company list.
    ///
    /// The first load selects the preselected company; later loads keep the
    /// current selection if it still exists.
    pub async fn reload(&mut self) {
        let target = if self.loaded {
            self.selected_company.as_ref().map(|c| c.id)
        } else {
            self.preselect
        };

        match self.services.companies.list_for_owner(self.owner).await {
            Ok(companies) => {
                self.companies = companies;
                self.loaded = true;
            }
            Err(e) => {
                tracing::error!("[Detail] Failed to load companies: {}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }

        let keep_activity = self.selected_activity;
        let editor = self.activity_editor.take();
        self.select_company(target).await;
        if self.selected_company.as_ref().map(|c| c.id) == target && target.is_some() {
            self.select_activity(keep_activity);
            self.activity_editor = editor;
        }
    }

    async fn load_activities(&mut self) {
        let Some(company_id) = self.selected_company.as_ref().map(|c| c.id) else {
            self.activities.clear();
            return;
        };
        match self.services.activities.list_for_company(company_id).await {
            Ok(activities) => self.activities = activities,
            Err(e) => {
                tracing::error!("[Detail] Failed to load activities of {}: {}", company_id, e);
                self.activities.clear();
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    pub(crate) async fn activated(&mut self) {
        self.reload().await;
    }

    pub(crate) async fn process(&mut self) {
        let intents = self.intents.drain();
        if intents.is_empty() {
            return;
        }
        for intent in intents {
            let outcome = self.apply(intent).await;
            if let Err(e) = outcome {
                tracing::warn!("[Detail] Operation failed: {}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
        self.requery.notify();
    }

    async fn apply(&mut self, intent: DetailIntent) -> Result<()> {
        match intent {
            DetailIntent::Refresh => self.reload().await,
            DetailIntent::OpenActivityEditor(target) => {
                if self.selected_company.is_none() {
                    return Ok(());
                }
                let statuses = self.services.statuses.list_all().await?;
                self.activity_editor = match target {
                    None => Some(ActivityEditor::for_create(statuses)),
                    Some(id) => self
                        .activities
                        .iter()
                        .find(|a| a.id == id)
                        .map(|activity| ActivityEditor::for_edit(activity, statuses)),
                };
            }
            DetailIntent::SaveActivity => {
                let (Some(company), Some(editor)) = (&self.selected_company, &self.activity_editor) else {
                    return Ok(());
                };
                let Some(draft) = editor.draft() else {
                    self.notice = Some(Notice::Error("Choose a status for the activity.".to_string()));
                    return Ok(());
                };
                match editor.mode() {
                    ActivityEditorMode::Create => {
                        self.services.activities.add(company.id, &draft).await?;
                    }
                    ActivityEditorMode::Edit(id) => {
                        self.services.activities.update(id, &draft).await?;
                    }
                }
                self.activity_editor = None;
                self.notice = Some(Notice::Info("Activity saved.".to_string()));
                self.load_activities().await;
            }
            DetailIntent::DeleteActivity => {
                let Some(ActivityEditorMode::Edit(id)) = self.activity_editor.as_ref().map(ActivityEditor::mode) else {
                    return Ok(());
                };
                self.services.activities.delete(id).await?;
                self.activity_editor = None;
                self.selected_activity = None;
                self.notice = Some(Notice::Info("Activity deleted.".to_string()));
                self.load_activities().await;
            }
            DetailIntent::DiscardActivity => {
                self.activity_editor = None;
            }
            DetailIntent::DeleteCompany(id) => {
                self.services.companies.delete(id).await?;
                tracing::info!("[Detail] Deleted company {}", id);
                self.selected_company = None;
                self.notice = Some(Notice::Info("The company was deleted.".to_string()));
                self.reload().await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{Fixture, fixture, navigator};
    use chrono::NaiveDate;
    use prospect_core::activity::{ActivityDraft, ActivityRepository};
    use prospect_core::company::{CompanyDetails, CompanyRepository};

    async fn add_company(fx: &Fixture, owner: ParticipantId, name: &str) -> Company {
        CompanyRepository::add(
            fx.store.as_ref(),
            owner,
            &CompanyDetails {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    async fn add_activity(fx: &Fixture, company: CompanyId, day: u32, comment: &str) -> Activity {
        ActivityRepository::add(
            fx.store.as_ref(),
            company,
            &ActivityDraft {
                date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
                comment: comment.to_string(),
                status_id: 1,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_commands_follow_selection() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        let first = add_activity(&fx, acme.id, 1, "sent").await;
        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, None);
        page.activated().await;

        let empty = page.selection();
        assert!(!page.edit_company.can_invoke(&empty));
        assert!(!page.delete_company.can_invoke(&empty));
        assert!(!page.add_activity.can_invoke(&empty));
        assert!(!page.edit_activity.can_invoke(&empty));

        page.select_company(Some(acme.id)).await;
        assert_eq!(page.activities().len(), 1);
        let with_company = page.selection();
        assert!(page.edit_company.can_invoke(&with_company));
        assert!(page.add_activity.can_invoke(&with_company));
        assert!(!page.edit_activity.can_invoke(&with_company));

        page.select_activity(Some(first.id));
        assert!(page.edit_activity.can_invoke(&page.selection()));
    }

    #[tokio::test]
    async fn test_preselection_applies_on_first_load() {
        let fx = fixture();
        add_company(&fx, 1, "Acme").await;
        let beta = add_company(&fx, 1, "Beta").await;
        add_activity(&fx, beta.id, 3, "called").await;

        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, Some(beta.id));
        page.activated().await;

        assert_eq!(page.selected_company().unwrap().id, beta.id);
        assert_eq!(page.activities()[0].comment, "called");
    }

    #[tokio::test]
    async fn test_reload_keeps_selection() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, None);
        page.activated().await;
        page.select_company(Some(acme.id)).await;

        add_company(&fx, 1, "Zeta").await;
        page.refresh.invoke(&()).unwrap();
        page.process().await;

        assert_eq!(page.companies().len(), 2);
        assert_eq!(page.selected_company().unwrap().id, acme.id);
    }

    #[tokio::test]
    async fn test_edit_company_requests_editor() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        let (nav, mut requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, Some(acme.id));
        page.activated().await;

        page.edit_company.invoke(&page.selection()).unwrap();
        assert_eq!(
            requests.try_recv().unwrap(),
            NavigationRequest::CompanyEditorFor(acme.id)
        );
    }

    #[tokio::test]
    async fn test_add_and_edit_activity() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, Some(acme.id));
        page.activated().await;

        page.add_activity.invoke(&page.selection()).unwrap();
        page.process().await;
        let editor = page.activity_editor_mut().unwrap();
        assert_eq!(editor.mode(), ActivityEditorMode::Create);
        editor.comment = "first contact".to_string();
        assert!(editor.select_status(2));

        page.save_activity.invoke(&page.selection()).unwrap();
        page.process().await;
        assert!(page.activity_editor().is_none());
        assert_eq!(page.activities().len(), 1);
        assert_eq!(page.activities()[0].status_label, "Phone call");

        let id = page.activities()[0].id;
        page.select_activity(Some(id));
        page.edit_activity.invoke(&page.selection()).unwrap();
        page.process().await;
        let editor = page.activity_editor_mut().unwrap();
        assert_eq!(editor.selected_status(), Some(2));
        editor.comment = "follow-up".to_string();

        page.save_activity.invoke(&page.selection()).unwrap();
        page.process().await;
        assert_eq!(page.activities()[0].comment, "follow-up");
    }

    #[tokio::test]
    async fn test_save_without_status_keeps_form_open() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, Some(acme.id));
        page.activated().await;

        page.add_activity.invoke(&page.selection()).unwrap();
        page.process().await;
        page.save_activity.invoke(&page.selection()).unwrap();
        page.process().await;

        assert!(page.activity_editor().is_some());
        assert!(page.notice().unwrap().is_error());
        assert!(page.activities().is_empty());
    }

    #[tokio::test]
    async fn test_delete_activity_from_editor() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        let activity = add_activity(&fx, acme.id, 2, "obsolete").await;
        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, Some(acme.id));
        page.activated().await;

        assert!(!page.delete_activity.can_invoke(&page.selection()));
        page.select_activity(Some(activity.id));
        page.edit_activity.invoke(&page.selection()).unwrap();
        page.process().await;
        page.delete_activity.invoke(&page.selection()).unwrap();
        page.process().await;

        assert!(page.activities().is_empty());
        assert!(page.activity_editor().is_none());
    }

    #[tokio::test]
    async fn test_delete_company_removes_its_activities() {
        let fx = fixture();
        let acme = add_company(&fx, 1, "Acme").await;
        add_activity(&fx, acme.id, 1, "a").await;
        add_activity(&fx, acme.id, 2, "b").await;
        let (nav, _requests) = navigator();
        let mut page = CompanyDetailPage::new(fx.services.clone(), 1, nav, Some(acme.id));
        page.activated().await;

        page.delete_company.invoke(&page.selection()).unwrap();
        page.process().await;

        assert!(page.selected_company().is_none());
        assert!(page.companies().is_empty());
        assert!(
            ActivityRepository::list_for_company(fx.store.as_ref(), acme.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(page.notice().map(Notice::is_error), Some(false));
    }
}
