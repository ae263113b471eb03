//! Cross-page navigation requests.

use prospect_core::company::CompanyId;
use tokio::sync::mpsc;

/// A page change asked for by a page or a main-window command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    Welcome,
    Settings,
    CompanyOverview,
    CompanyDetail,
    CompanyDetailFor(CompanyId),
    CompanyEditor,
    CompanyEditorFor(CompanyId),
    Help,
    CloseHelp,
}

/// Handle pages use to ask the router for a page change.
///
/// Requests are queued and applied by [`NavigationRouter::pump`], so a page
/// never holds a reference to the router or to another page.
///
/// [`NavigationRouter::pump`]: super::NavigationRouter::pump
#[derive(Debug, Clone)]
pub struct Navigator {
    sender: mpsc::UnboundedSender<NavigationRequest>,
}

impl Navigator {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn request(&self, request: NavigationRequest) {
        if self.sender.send(request).is_err() {
            tracing::warn!("[Router] Dropped {:?}, router is gone", request);
        }
    }
}
