//! The main window's page router.

use super::page_kind::PageKind;
use super::request::{NavigationRequest, Navigator};
use crate::bootstrap::AuthenticatedSession;
use crate::pages::{
    CompanyDetailPage, CompanyEditorPage, CompanyOverviewPage, EditorMode, HelpPage, SettingsPage, WelcomePage,
};
use crate::services::RecordServices;
use prospect_core::command::Command;
use prospect_core::company::CompanyId;
use prospect_core::profile::ParticipantId;
use prospect_core::session::SessionStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc, watch};

/// Upper bound on process/apply rounds per pump, so two pages that keep
/// requesting each other cannot spin the control loop forever.
const MAX_PUMP_ROUNDS: usize = 16;

/// Name and course line shown in the window header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub display_name: String,
    pub course: String,
}

impl HeaderInfo {
    pub fn from_session(session: &SessionStore) -> Self {
        match session.current() {
            Some(profile) => {
                let display_name = profile.display_name();
                Self {
                    display_name: if display_name.is_empty() {
                        "Unknown".to_string()
                    } else {
                        display_name
                    },
                    course: profile.course,
                }
            }
            None => Self {
                display_name: "Unknown".to_string(),
                course: "Not signed in".to_string(),
            },
        }
    }
}

/// The page currently shown, or a cached one.
///
/// Clones share the same page instance.
#[derive(Clone)]
pub enum ActivePage {
    Welcome(Arc<RwLock<WelcomePage>>),
    Settings(Arc<RwLock<SettingsPage>>),
    CompanyOverview(Arc<RwLock<CompanyOverviewPage>>),
    CompanyDetail(Arc<RwLock<CompanyDetailPage>>),
    CompanyEditor(Arc<RwLock<CompanyEditorPage>>),
    Help(Arc<RwLock<HelpPage>>),
}

macro_rules! each_page {
    ($active:expr, $page:ident => $body:expr) => {
        match $active {
            ActivePage::Welcome($page) => $body,
            ActivePage::Settings($page) => $body,
            ActivePage::CompanyOverview($page) => $body,
            ActivePage::CompanyDetail($page) => $body,
            ActivePage::CompanyEditor($page) => $body,
            ActivePage::Help($page) => $body,
        }
    };
}

impl ActivePage {
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Welcome(_) => PageKind::Welcome,
            Self::Settings(_) => PageKind::Settings,
            Self::CompanyOverview(_) => PageKind::CompanyOverview,
            Self::CompanyDetail(_) => PageKind::CompanyDetail,
            Self::CompanyEditor(_) => PageKind::CompanyEditor,
            Self::Help(_) => PageKind::Help,
        }
    }

    /// True when both handles point at the same page instance.
    pub fn same_instance(&self, other: &ActivePage) -> bool {
        match (self, other) {
            (Self::Welcome(a), Self::Welcome(b)) => Arc::ptr_eq(a, b),
            (Self::Settings(a), Self::Settings(b)) => Arc::ptr_eq(a, b),
            (Self::CompanyOverview(a), Self::CompanyOverview(b)) => Arc::ptr_eq(a, b),
            (Self::CompanyDetail(a), Self::CompanyDetail(b)) => Arc::ptr_eq(a, b),
            (Self::CompanyEditor(a), Self::CompanyEditor(b)) => Arc::ptr_eq(a, b),
            (Self::Help(a), Self::Help(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    async fn activated(&self) {
        each_page!(self, page => page.write().await.activated().await)
    }

    async fn process(&self) {
        each_page!(self, page => page.write().await.process().await)
    }
}

impl std::fmt::Debug for ActivePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActivePage({})", self.kind())
    }
}

/// Main-window menu entries. Each posts a request that the next pump applies.
#[derive(Debug, Clone)]
pub struct MainCommands {
    pub show_welcome: Command,
    pub show_settings: Command,
    pub show_company_overview: Command,
    pub show_company_detail: Command,
    pub show_company_editor: Command,
    pub show_help: Command,
    pub close_help: Command,
}

fn posting(name: &'static str, navigator: &Navigator, request: NavigationRequest) -> Command {
    let navigator = navigator.clone();
    Command::new(name, move |_| navigator.request(request))
}

impl MainCommands {
    fn new(navigator: &Navigator) -> Self {
        Self {
            show_welcome: posting("show-welcome", navigator, NavigationRequest::Welcome),
            show_settings: posting("show-settings", navigator, NavigationRequest::Settings),
            show_company_overview: posting("show-company-overview", navigator, NavigationRequest::CompanyOverview),
            show_company_detail: posting("show-company-detail", navigator, NavigationRequest::CompanyDetail),
            show_company_editor: posting("show-company-editor", navigator, NavigationRequest::CompanyEditor),
            show_help: posting("show-help", navigator, NavigationRequest::Help),
            close_help: posting("close-help", navigator, NavigationRequest::CloseHelp),
        }
    }
}

/// Owns the active page, the page cache and the help return slot.
///
/// Only constructible from an [`AuthenticatedSession`], so no page can be
/// shown before the startup gate has opened.
pub struct NavigationRouter {
    auth: AuthenticatedSession,
    services: RecordServices,
    header: HeaderInfo,
    navigator: Navigator,
    requests: mpsc::UnboundedReceiver<NavigationRequest>,
    commands: MainCommands,
    cache: HashMap<PageKind, ActivePage>,
    active: ActivePage,
    /// Page to return to when help closes; never holds the help page itself
    previous_page: Option<ActivePage>,
    active_kind: watch::Sender<PageKind>,
}

impl NavigationRouter {
    /// Builds the router with the welcome page active.
    pub fn new(auth: AuthenticatedSession, services: RecordServices) -> Self {
        let (navigator, requests) = Navigator::channel();
        let header = HeaderInfo::from_session(auth.session());
        let welcome = ActivePage::Welcome(Arc::new(RwLock::new(WelcomePage::new(&header))));
        let mut cache = HashMap::new();
        cache.insert(PageKind::Welcome, welcome.clone());
        let (active_kind, _) = watch::channel(PageKind::Welcome);
        let commands = MainCommands::new(&navigator);

        tracing::info!(
            "[Router] Main window opened for participant {}",
            auth.profile().participant_id
        );

        Self {
            auth,
            services,
            header,
            navigator,
            requests,
            commands,
            cache,
            active: welcome,
            previous_page: None,
            active_kind,
        }
    }

    fn owner(&self) -> ParticipantId {
        self.auth.profile().participant_id
    }

    pub fn header(&self) -> &HeaderInfo {
        &self.header
    }

    pub fn commands(&self) -> &MainCommands {
        &self.commands
    }

    /// Handle for code outside the pages that wants to request navigation.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn active_page(&self) -> &ActivePage {
        &self.active
    }

    pub fn active_kind(&self) -> PageKind {
        self.active.kind()
    }

    /// Whether a page is waiting to be restored by [`close_help`](Self::close_help).
    pub fn has_saved_page(&self) -> bool {
        self.previous_page.is_some()
    }

    /// Watches the kind of the active page.
    pub fn subscribe(&self) -> watch::Receiver<PageKind> {
        self.active_kind.subscribe()
    }

    pub async fn show_welcome(&mut self) {
        let page = self.cached(PageKind::Welcome, |router| {
            ActivePage::Welcome(Arc::new(RwLock::new(WelcomePage::new(&router.header))))
        });
        self.activate(page).await;
    }

    pub async fn show_settings(&mut self) {
        let page = self.cached(PageKind::Settings, |router| {
            let page = SettingsPage::new(router.services.clone(), router.auth.session().clone());
            ActivePage::Settings(Arc::new(RwLock::new(page)))
        });
        self.activate(page).await;
    }

    pub async fn show_company_overview(&mut self) {
        let page = self.cached(PageKind::CompanyOverview, |router| {
            let page = CompanyOverviewPage::new(router.services.clone(), router.owner(), router.navigator.clone());
            ActivePage::CompanyOverview(Arc::new(RwLock::new(page)))
        });
        self.activate(page).await;
    }

    pub async fn show_company_detail(&mut self) {
        let page = self.cached(PageKind::CompanyDetail, |router| {
            let page = CompanyDetailPage::new(router.services.clone(), router.owner(), router.navigator.clone(), None);
            ActivePage::CompanyDetail(Arc::new(RwLock::new(page)))
        });
        self.activate(page).await;
    }

    /// Opens a new detail page with `id` selected.
    pub async fn show_company_detail_for(&mut self, id: CompanyId) {
        let page = CompanyDetailPage::new(self.services.clone(), self.owner(), self.navigator.clone(), Some(id));
        self.activate(ActivePage::CompanyDetail(Arc::new(RwLock::new(page))))
            .await;
    }

    /// Opens a blank create form.
    pub async fn show_company_editor(&mut self) {
        self.open_editor(EditorMode::Create).await;
    }

    pub async fn show_company_editor_for(&mut self, id: CompanyId) {
        self.open_editor(EditorMode::Edit(id)).await;
    }

    async fn open_editor(&mut self, mode: EditorMode) {
        let page = CompanyEditorPage::new(self.services.clone(), self.owner(), self.navigator.clone(), mode);
        self.activate(ActivePage::CompanyEditor(Arc::new(RwLock::new(page))))
            .await;
    }

    /// Shows help for the active page and remembers that page.
    ///
    /// Does nothing while help is already showing.
    pub async fn show_help(&mut self) {
        if self.active.kind() == PageKind::Help {
            tracing::debug!("[Router] Help is already showing");
            return;
        }
        let context = self.active.kind().help_context();
        self.previous_page = Some(self.active.clone());
        let help = HelpPage::new(context, self.navigator.clone());
        tracing::debug!("[Router] Showing help for '{}'", context);
        self.set_active(ActivePage::Help(Arc::new(RwLock::new(help))));
    }

    /// Returns to the page help was opened from.
    ///
    /// The page comes back as it was left, without reloading. Without a saved
    /// page the welcome page is shown instead.
    pub async fn close_help(&mut self) {
        match self.previous_page.take() {
            Some(page) => self.set_active(page),
            None => {
                tracing::error!(
                    "[Router] NavigationStateFault: close_help with no saved page (active: {}), showing welcome",
                    self.active.kind()
                );
                self.show_welcome().await;
            }
        }
    }

    /// Applies one navigation request.
    pub async fn apply(&mut self, request: NavigationRequest) {
        tracing::debug!("[Router] Applying {:?}", request);
        match request {
            NavigationRequest::Welcome => self.show_welcome().await,
            NavigationRequest::Settings => self.show_settings().await,
            NavigationRequest::CompanyOverview => self.show_company_overview().await,
            NavigationRequest::CompanyDetail => self.show_company_detail().await,
            NavigationRequest::CompanyDetailFor(id) => self.show_company_detail_for(id).await,
            NavigationRequest::CompanyEditor => self.show_company_editor().await,
            NavigationRequest::CompanyEditorFor(id) => self.show_company_editor_for(id).await,
            NavigationRequest::Help => self.show_help().await,
            NavigationRequest::CloseHelp => self.close_help().await,
        }
    }

    /// Lets the active page process its pending intents, then applies queued
    /// navigation requests. Returns how many requests were applied.
    pub async fn pump(&mut self) -> usize {
        let mut applied = 0;
        for _ in 0..MAX_PUMP_ROUNDS {
            self.active.process().await;

            let mut batch = Vec::new();
            while let Ok(request) = self.requests.try_recv() {
                batch.push(request);
            }
            if batch.is_empty() {
                return applied;
            }
            for request in batch {
                self.apply(request).await;
                applied += 1;
            }
        }
        tracing::warn!("[Router] Stopped pumping after {} rounds", MAX_PUMP_ROUNDS);
        applied
    }

    fn cached(&mut self, kind: PageKind, build: impl FnOnce(&Self) -> ActivePage) -> ActivePage {
        if let Some(page) = self.cache.get(&kind) {
            return page.clone();
        }
        let page = build(self);
        self.cache.insert(kind, page.clone());
        page
    }

    async fn activate(&mut self, page: ActivePage) {
        page.activated().await;
        self.set_active(page);
    }

    fn set_active(&mut self, page: ActivePage) {
        if self.active.kind() == PageKind::Help && page.kind() != PageKind::Help {
            // Leaving help by any route uses up the return slot.
            self.previous_page = None;
        }
        let kind = page.kind();
        self.active = page;
        self.active_kind.send_replace(kind);
        tracing::debug!("[Router] Active page: {}", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{Fixture, fixture};
    use prospect_core::company::{CompanyDetails, CompanyRepository};
    use prospect_core::profile::Profile;
    use strum::IntoEnumIterator;

    fn router() -> (Fixture, NavigationRouter) {
        let fx = fixture();
        let session = Arc::new(SessionStore::new());
        let profile = Profile {
            identifier: "105".to_string(),
            participant_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            course: "Retraining 2025".to_string(),
            email: String::new(),
            must_rotate_credential: false,
        };
        session.sign_in(profile.clone());
        let router = NavigationRouter::new(AuthenticatedSession::new(profile, session), fx.services.clone());
        (fx, router)
    }

    async fn add_company(fx: &Fixture, name: &str) -> CompanyId {
        CompanyRepository::add(
            fx.store.as_ref(),
            1,
            &CompanyDetails {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn show(router: &mut NavigationRouter, kind: PageKind) {
        match kind {
            PageKind::Welcome => router.show_welcome().await,
            PageKind::Settings => router.show_settings().await,
            PageKind::CompanyOverview => router.show_company_overview().await,
            PageKind::CompanyDetail => router.show_company_detail().await,
            PageKind::CompanyEditor => router.show_company_editor().await,
            PageKind::Help => router.show_help().await,
        }
    }

    async fn help_context(router: &NavigationRouter) -> String {
        match router.active_page() {
            ActivePage::Help(help) => help.read().await.context().to_string(),
            other => panic!("expected help, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_starts_on_welcome_with_header() {
        let (_fx, router) = router();
        assert_eq!(router.active_kind(), PageKind::Welcome);
        assert_eq!(router.header().display_name, "Ada Lovelace");
        assert_eq!(router.header().course, "Retraining 2025");
        match router.active_page() {
            ActivePage::Welcome(page) => assert_eq!(page.read().await.greeting(), "Welcome, Ada Lovelace"),
            other => panic!("expected welcome, got {:?}", other),
        }
    }

    #[test]
    fn test_header_fallbacks_when_signed_out() {
        let header = HeaderInfo::from_session(&SessionStore::new());
        assert_eq!(header.display_name, "Unknown");
        assert_eq!(header.course, "Not signed in");
    }

    #[tokio::test]
    async fn test_help_restores_every_page_kind() {
        let (_fx, mut router) = router();
        for kind in PageKind::iter().filter(|kind| *kind != PageKind::Help) {
            show(&mut router, kind).await;
            let before = router.active_page().clone();

            router.show_help().await;
            assert_eq!(router.active_kind(), PageKind::Help);
            assert_eq!(help_context(&router).await, kind.help_context());
            assert!(router.has_saved_page());

            router.close_help().await;
            assert_eq!(router.active_kind(), kind);
            assert!(router.active_page().same_instance(&before));
            assert!(!router.has_saved_page());
        }
    }

    #[tokio::test]
    async fn test_close_help_without_show_falls_back_to_welcome() {
        let (_fx, mut router) = router();
        router.show_settings().await;
        router.close_help().await;
        assert_eq!(router.active_kind(), PageKind::Welcome);
        assert!(!router.has_saved_page());
    }

    #[tokio::test]
    async fn test_show_help_is_idempotent() {
        let (_fx, mut router) = router();
        router.show_company_overview().await;
        router.show_help().await;
        let help = router.active_page().clone();

        router.show_help().await;
        assert!(router.active_page().same_instance(&help));
        assert_eq!(help_context(&router).await, "company-overview");

        router.close_help().await;
        assert_eq!(router.active_kind(), PageKind::CompanyOverview);
    }

    #[tokio::test]
    async fn test_leaving_help_through_menu_clears_slot() {
        let (_fx, mut router) = router();
        router.show_settings().await;
        router.show_help().await;
        router.show_company_overview().await;
        assert!(!router.has_saved_page());

        router.close_help().await;
        assert_eq!(router.active_kind(), PageKind::Welcome);
    }

    #[tokio::test]
    async fn test_cached_and_fresh_pages() {
        let (fx, mut router) = router();
        let id = add_company(&fx, "Acme").await;

        router.show_settings().await;
        let settings = router.active_page().clone();
        router.show_welcome().await;
        router.show_settings().await;
        assert!(router.active_page().same_instance(&settings));

        router.show_company_editor().await;
        let editor = router.active_page().clone();
        router.show_company_editor().await;
        assert!(!router.active_page().same_instance(&editor));

        router.show_company_detail_for(id).await;
        let first = router.active_page().clone();
        router.show_company_detail_for(id).await;
        assert!(!router.active_page().same_instance(&first));
        match router.active_page() {
            ActivePage::CompanyDetail(page) => {
                assert_eq!(page.read().await.selected_company().map(|c| c.id), Some(id))
            }
            other => panic!("expected detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overview_refreshes_on_each_visit() {
        let (fx, mut router) = router();
        router.show_company_overview().await;
        add_company(&fx, "Acme").await;
        router.show_welcome().await;
        router.show_company_overview().await;

        match router.active_page() {
            ActivePage::CompanyOverview(page) => assert_eq!(page.read().await.rows().len(), 1),
            other => panic!("expected overview, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_page_requests_are_applied_by_pump() {
        let (fx, mut router) = router();
        let id = add_company(&fx, "Acme").await;
        router.show_company_overview().await;

        if let ActivePage::CompanyOverview(page) = router.active_page() {
            let mut page = page.write().await;
            page.select(Some(id));
            page.open_detail.invoke(&page.selected()).unwrap();
        }
        assert_eq!(router.pump().await, 1);

        assert_eq!(router.active_kind(), PageKind::CompanyDetail);
        match router.active_page() {
            ActivePage::CompanyDetail(page) => {
                assert_eq!(page.read().await.selected_company().map(|c| c.id), Some(id))
            }
            other => panic!("expected detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_main_commands_go_through_pump() {
        let (_fx, mut router) = router();
        router.commands().show_settings.invoke(&()).unwrap();
        router.commands().show_help.invoke(&()).unwrap();
        router.pump().await;
        assert_eq!(router.active_kind(), PageKind::Help);
        assert_eq!(help_context(&router).await, "settings");

        if let ActivePage::Help(help) = router.active_page() {
            help.read().await.close.invoke(&()).unwrap();
        }
        router.pump().await;
        assert_eq!(router.active_kind(), PageKind::Settings);
    }

    #[tokio::test]
    async fn test_observers_see_active_kind() {
        let (_fx, mut router) = router();
        let mut kinds = router.subscribe();
        assert_eq!(*kinds.borrow_and_update(), PageKind::Welcome);

        router.show_company_detail().await;
        assert!(kinds.has_changed().unwrap());
        assert_eq!(*kinds.borrow_and_update(), PageKind::CompanyDetail);
    }

    #[tokio::test]
    async fn test_editor_update_returns_to_detail() {
        let (fx, mut router) = router();
        let id = add_company(&fx, "Acme").await;
        router.show_company_editor_for(id).await;

        if let ActivePage::CompanyEditor(page) = router.active_page() {
            let mut page = page.write().await;
            assert_eq!(page.form.name, "Acme");
            page.form.name = "Acme Corp".to_string();
            page.save.invoke(&page.state()).unwrap();
        }
        router.pump().await;

        assert_eq!(router.active_kind(), PageKind::CompanyDetail);
        match router.active_page() {
            ActivePage::CompanyDetail(page) => {
                let page = page.read().await;
                assert_eq!(page.selected_company().unwrap().details.name, "Acme Corp");
            }
            other => panic!("expected detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_editor_cancel_returns_to_welcome() {
        let (_fx, mut router) = router();
        router.show_company_editor().await;
        if let ActivePage::CompanyEditor(page) = router.active_page() {
            page.read().await.cancel.invoke(&()).unwrap();
        }
        router.pump().await;
        assert_eq!(router.active_kind(), PageKind::Welcome);
    }
}
