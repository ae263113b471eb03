//! TOML-based ProfileRepository implementation.
//!
//! The profile store is a list of `[[profile]]` tables:
//!
//! ```toml
//! [[profile]]
//! identifier = "105"
//! participant_id = 1
//! first_name = "Ada"
//! last_name = "Lovelace"
//! course = "IT-2024"
//! must_rotate_credential = true
//! ```

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use prospect_core::error::Result;
use prospect_core::profile::{Profile, ProfileRepository};
use prospect_core::ProspectError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileDocument {
    #[serde(default, rename = "profile")]
    profiles: Vec<Profile>,
}

/// Reads participant profiles from a TOML file.
///
/// The file is provisioned by an administrator. A missing file is an error,
/// not an empty store: the authority may know identifiers that this machine
/// was never told about, and the gate must say so instead of "not found".
pub struct TomlProfileRepository {
    file: AtomicTomlFile<ProfileDocument>,
}

impl TomlProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn load_all(&self) -> Result<Vec<Profile>> {
        if !self.file.exists() {
            return Err(ProspectError::data_access(format!(
                "profile store {:?} does not exist",
                self.file.path()
            )));
        }
        let document = self.file.load()?.unwrap_or_default();
        Ok(document.profiles)
    }
}

#[async_trait]
impl ProfileRepository for TomlProfileRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Profile>> {
        let profiles = self.load_all().inspect_err(|e| {
            tracing::error!("[Profiles] Failed to read {:?}: {}", self.file.path(), e)
        })?;

        Ok(profiles
            .into_iter()
            .find(|profile| profile.identifier == identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[[profile]]
identifier = "105"
participant_id = 1
first_name = "Ada"
last_name = "Lovelace"
course = "IT-2024"

[[profile]]
identifier = "106"
participant_id = 2
first_name = "Alan"
last_name = "Turing"
must_rotate_credential = true
"#;

    fn repository_with(content: &str) -> (TempDir, TomlProfileRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.toml");
        std::fs::write(&path, content).unwrap();
        (temp_dir, TomlProfileRepository::new(path))
    }

    #[tokio::test]
    async fn test_find_existing_profile() {
        let (_dir, repository) = repository_with(SAMPLE);

        let found = repository.find_by_identifier("106").await.unwrap().unwrap();
        assert_eq!(found.participant_id, 2);
        assert!(found.must_rotate_credential);
        assert_eq!(found.course, "");
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_none() {
        let (_dir, repository) = repository_with(SAMPLE);
        assert!(repository.find_by_identifier("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_file_is_an_empty_store() {
        let (_dir, repository) = repository_with("");
        assert!(repository.find_by_identifier("105").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlProfileRepository::new(temp_dir.path().join("absent.toml"));

        let err = repository.find_by_identifier("105").await.unwrap_err();
        assert!(matches!(err, ProspectError::DataAccess(_)));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let (_dir, repository) = repository_with("[[profile]\nidentifier = ");
        assert!(repository.find_by_identifier("105").await.is_err());
    }
}
