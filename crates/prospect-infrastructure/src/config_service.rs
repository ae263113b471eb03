//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use crate::paths::ProspectPaths;
use crate::storage::AtomicTomlFile;
use prospect_core::config::RootConfig;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// A missing file is created with defaults on first load so users have
/// something to edit. Any read error falls back to defaults with a warning.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config location.
    pub fn new() -> Self {
        let path = ProspectPaths::new(None).config_file().ok();
        Self::with_path(path)
    }

    /// Creates a service for an explicit file (tests, `--config`).
    pub fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = self.load_config();

        let mut cache = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cache = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cache = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cache = None;
    }

    fn load_config(&self) -> RootConfig {
        let Some(path) = &self.path else {
            tracing::warn!("[Config] No config location available, using defaults");
            return RootConfig::default();
        };

        let file = AtomicTomlFile::<RootConfig>::new(path.clone());
        match file.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let defaults = RootConfig::default();
                if let Err(e) = file.save(&defaults) {
                    tracing::warn!("[Config] Failed to write default config to {:?}: {}", path, e);
                } else {
                    tracing::info!("[Config] Created default config at {:?}", path);
                }
                defaults
            }
            Err(e) => {
                tracing::warn!("[Config] Failed to read {:?}, using defaults: {}", path, e);
                RootConfig::default()
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(Some(path.clone()));

        let config = service.get_config();
        assert_eq!(config, RootConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_cache_survives_file_change_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\nbase_url = \"https://one.example\"\n").unwrap();
        let service = ConfigService::with_path(Some(path.clone()));
        assert_eq!(service.get_config().auth.base_url, "https://one.example");

        std::fs::write(&path, "[auth]\nbase_url = \"https://two.example\"\n").unwrap();
        assert_eq!(service.get_config().auth.base_url, "https://one.example");

        service.invalidate_cache();
        assert_eq!(service.get_config().auth.base_url, "https://two.example");
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[auth\n").unwrap();

        let service = ConfigService::with_path(Some(path));
        assert_eq!(service.get_config(), RootConfig::default());
    }
}
