//! Unified path management for prospect files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/prospect/          # Config directory
//! ├── config.toml              # Application configuration
//! └── profiles.toml            # Local participant profiles
//!
//! ~/.local/share/prospect/     # Data directory
//! ├── records.toml             # Companies, activities, status options
//! └── logs/                    # Application logs
//!     └── prospect.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot find the home directory")]
    HomeDirNotFound,
}

/// Resolves every file location from either the platform directories or an
/// explicit base directory (tests, portable installs).
#[derive(Debug, Clone, Default)]
pub struct ProspectPaths {
    base_dir: Option<PathBuf>,
}

impl ProspectPaths {
    const APP_DIR: &'static str = "prospect";

    /// Creates a resolver. `base_dir` replaces both config and data roots.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the prospect configuration directory.
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/prospect/`
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the prospect data directory (e.g. `~/.local/share/prospect/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn profiles_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("profiles.toml"))
    }

    pub fn records_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("records.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
