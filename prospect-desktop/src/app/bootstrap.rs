use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use prospect_application::{BootstrapController, RecordServices};
use prospect_core::config::RootConfig;
use prospect_core::session::SessionStore;
use prospect_infrastructure::paths::{PathError, ProspectPaths};
use prospect_infrastructure::{HttpCredentialService, TomlProfileRepository, TomlRecordStore};

use crate::app::AppState;

pub struct AppBootstrap {
    pub app_state: AppState,
}

fn resolve(configured: &Option<PathBuf>, default: impl FnOnce() -> Result<PathBuf, PathError>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.clone()),
        None => Ok(default()?),
    }
}

impl AppBootstrap {
    /// Builds the adapters and the bootstrap controller.
    ///
    /// Nothing here talks to the authority yet; files are opened lazily by
    /// the repositories.
    pub fn initialize(paths: &ProspectPaths, config: &RootConfig) -> Result<Self> {
        let profiles_file = resolve(&config.storage.profiles_file, || paths.profiles_file())?;
        let records_file = resolve(&config.storage.records_file, || paths.records_file())?;

        tracing::info!(
            "[Bootstrap] Authority at {}, profiles in {:?}, records in {:?}",
            config.auth.base_url,
            profiles_file,
            records_file
        );

        let credentials = Arc::new(HttpCredentialService::from_settings(&config.auth));
        let profiles = Arc::new(TomlProfileRepository::new(profiles_file));
        let records = Arc::new(TomlRecordStore::new(records_file));
        let session = SessionStore::global();

        let controller = Arc::new(BootstrapController::new(
            credentials.clone(),
            credentials.clone(),
            profiles,
            session.clone(),
        ));
        let services = RecordServices::from_store(records, credentials);

        Ok(Self {
            app_state: AppState {
                controller,
                services,
                session,
            },
        })
    }
}
