use std::sync::Arc;

use prospect_application::{BootstrapController, RecordServices};
use prospect_core::session::SessionStore;

/// Everything the binary wires up before the first modal is shown.
pub struct AppState {
    /// Shared with the Ctrl-C task so it can cancel a pending sign-in
    pub controller: Arc<BootstrapController>,
    pub services: RecordServices,
    pub session: Arc<SessionStore>,
}
