//! Collaborators the pages need, bundled for the router.

use prospect_core::activity::ActivityRepository;
use prospect_core::auth::{CredentialRotator, SecretPolicy};
use prospect_core::company::CompanyRepository;
use prospect_core::status::StatusRepository;
use std::sync::Arc;

/// Repositories and the rotation channel shared by every page.
#[derive(Clone)]
pub struct RecordServices {
    pub companies: Arc<dyn CompanyRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    pub statuses: Arc<dyn StatusRepository>,
    pub rotator: Arc<dyn CredentialRotator>,
    pub policy: SecretPolicy,
}

impl RecordServices {
    /// Uses one store for all three record repositories.
    pub fn from_store<S>(store: Arc<S>, rotator: Arc<dyn CredentialRotator>) -> Self
    where
        S: CompanyRepository + ActivityRepository + StatusRepository + 'static,
    {
        Self {
            companies: store.clone(),
            activities: store.clone(),
            statuses: store,
            rotator,
            policy: SecretPolicy::default(),
        }
    }
}
