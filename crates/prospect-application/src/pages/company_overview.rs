//! Company overview: every company with its latest activity.

use super::Notice;
use super::intents::IntentQueue;
use crate::navigation::{NavigationRequest, Navigator};
use crate::services::RecordServices;
use prospect_core::command::{Command, RequeryNotifier};
use prospect_core::company::{CompanyId, CompanySummary};
use prospect_core::profile::ParticipantId;

enum OverviewIntent {
    Refresh,
}

pub struct CompanyOverviewPage {
    services: RecordServices,
    owner: ParticipantId,
    rows: Vec<CompanySummary>,
    selected: Option<CompanyId>,
    intents: IntentQueue<OverviewIntent>,
    requery: RequeryNotifier,
    notice: Option<Notice>,
    pub refresh: Command,
    /// Opens the detail page for the selected company.
    pub open_detail: Command<Option<CompanyId>>,
}

impl CompanyOverviewPage {
    pub fn new(services: RecordServices, owner: ParticipantId, navigator: Navigator) -> Self {
        let intents = IntentQueue::new();
        let requery = RequeryNotifier::new();

        let poster = intents.poster();
        let refresh: Command = Command::new("refresh", move |_| poster.post(OverviewIntent::Refresh))
            .with_notifier(requery.clone());

        let open_detail = Command::new("open-detail", move |selected: &Option<CompanyId>| {
            if let Some(id) = *selected {
                navigator.request(NavigationRequest::CompanyDetailFor(id));
            }
        })
        .with_guard(|selected: &Option<CompanyId>| selected.is_some())
        .with_notifier(requery.clone());

        Self {
            services,
            owner,
            rows: Vec::new(),
            selected: None,
            intents,
            requery,
            notice: None,
            refresh,
            open_detail,
        }
    }

    pub fn rows(&self) -> &[CompanySummary] {
        &self.rows
    }

    pub fn selected(&self) -> Option<CompanyId> {
        self.selected
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Selects a listed company; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<CompanyId>) {
        self.selected = id.filter(|id| self.rows.iter().any(|row| row.company.id == *id));
        self.requery.notify();
    }

    /// Reloads the list, keeping the selection when the company still exists.
    pub async fn reload(&mut self) {
        match self.services.companies.list_with_latest_activity(self.owner).await {
            Ok(rows) => {
                self.rows = rows;
                self.notice = None;
                tracing::debug!("[Overview] Loaded {} companies", self.rows.len());
            }
            Err(e) => {
                tracing::error!("[Overview] Failed to load companies: {}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
        self.select(self.selected);
    }

    pub(crate) async fn activated(&mut self) {
        self.reload().await;
    }

    pub(crate) async fn process(&mut self) {
        let intents = self.intents.drain();
        if intents
            .iter()
            .any(|intent| matches!(intent, OverviewIntent::Refresh))
        {
            self.reload().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{fixture, navigator};
    use chrono::NaiveDate;
    use prospect_core::activity::{ActivityDraft, ActivityRepository};
    use prospect_core::company::{CompanyDetails, CompanyRepository};

    fn named(name: &str) -> CompanyDetails {
        CompanyDetails {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_activation_loads_latest_status() {
        let fx = fixture();
        let acme = CompanyRepository::add(fx.store.as_ref(), 1, &named("Acme")).await.unwrap();
        ActivityRepository::add(
            fx.store.as_ref(),
            acme.id,
            &ActivityDraft {
                date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                comment: "second round".to_string(),
                status_id: 3,
            },
        )
        .await
        .unwrap();
        CompanyRepository::add(fx.store.as_ref(), 2, &named("Foreign")).await.unwrap();

        let (nav, _requests) = navigator();
        let mut page = CompanyOverviewPage::new(fx.services.clone(), 1, nav);
        page.activated().await;

        assert_eq!(page.rows().len(), 1);
        assert_eq!(page.rows()[0].latest_status.as_deref(), Some("Interview"));
        assert_eq!(page.rows()[0].latest_comment.as_deref(), Some("second round"));
    }

    #[tokio::test]
    async fn test_open_detail_requires_selection() {
        let fx = fixture();
        let acme = CompanyRepository::add(fx.store.as_ref(), 1, &named("Acme")).await.unwrap();
        let (nav, mut requests) = navigator();
        let mut page = CompanyOverviewPage::new(fx.services.clone(), 1, nav);
        page.activated().await;

        assert!(!page.open_detail.can_invoke(&page.selected()));

        let mut changes = page.open_detail.subscribe();
        page.select(Some(acme.id));
        assert!(changes.has_changed().unwrap());
        assert!(page.open_detail.can_invoke(&page.selected()));

        page.open_detail.invoke(&page.selected()).unwrap();
        assert_eq!(
            requests.try_recv().unwrap(),
            NavigationRequest::CompanyDetailFor(acme.id)
        );
    }

    #[tokio::test]
    async fn test_refresh_keeps_existing_selection() {
        let fx = fixture();
        let acme = CompanyRepository::add(fx.store.as_ref(), 1, &named("Acme")).await.unwrap();
        let (nav, _requests) = navigator();
        let mut page = CompanyOverviewPage::new(fx.services.clone(), 1, nav);
        page.activated().await;
        page.select(Some(acme.id));

        CompanyRepository::add(fx.store.as_ref(), 1, &named("Beta")).await.unwrap();
        page.refresh.invoke(&()).unwrap();
        page.process().await;

        assert_eq!(page.rows().len(), 2);
        assert_eq!(page.selected(), Some(acme.id));

        CompanyRepository::delete(fx.store.as_ref(), acme.id).await.unwrap();
        page.reload().await;
        assert_eq!(page.selected(), None);
    }
}
