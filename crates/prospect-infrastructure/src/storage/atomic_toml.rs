//! Crash-safe TOML documents.
//!
//! Writes go to a uniquely named sibling temp file that is synced and renamed
//! over the target, so readers see either the old or the new document.
//! Read-modify-write cycles hold an exclusive lock on `<file>.lock` for their
//! whole duration.

use fs2::FileExt;
use prospect_core::ProspectError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failure of a single document operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("lock error: {0}")]
    Lock(String),
}

impl From<StorageError> for ProspectError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Io(io) => io.into(),
            StorageError::Parse(parse) => parse.into(),
            StorageError::Serialize(ser) => ser.into(),
            StorageError::Lock(message) => ProspectError::data_access(message),
        }
    }
}

/// A TOML document at a fixed path, deserialized as `T`.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the document.
    ///
    /// - `Ok(Some(T))`: Parsed successfully
    /// - `Ok(None)`: File is missing or blank
    /// - `Err`: Read or parse failure
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Writes `data` through a synced temp file and an atomic rename.
    ///
    /// The temp file gets a unique name in the target's directory, so
    /// concurrent saves never share it.
    pub fn save(&self, data: &T) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(data)?;

        let mut tmp_file = NamedTempFile::new_in(parent)?;
        tmp_file.write_all(rendered.as_bytes())?;
        tmp_file.as_file().sync_all()?;
        tmp_file.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    /// Loads (or starts from `default_value`), applies `f`, and saves, all
    /// under an exclusive lock.
    ///
    /// When `f` returns `Err` the document is left untouched and the error is
    /// handed back.
    pub fn update<R, E, F>(&self, default_value: T, f: F) -> Result<R, E>
    where
        E: From<StorageError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }
}

/// Exclusive advisory lock on `<file>.lock`, released when the handle closes.
///
/// The lock file stays on disk. Removing it while held would let a later
/// writer lock a fresh inode while a waiter still holds the old one.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| StorageError::Lock(format!("Failed to lock {}: {}", lock_path.display(), e)))?;

        Ok(FileLock { _file: file })
    }
}
