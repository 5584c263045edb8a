//! JSON document persistence.
//!
//! The snapshot lives in a single pretty-printed JSON file. Before each save
//! the previous file is copied to a backup slot, and `load` falls back to that
//! backup when the primary file is unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use super::{data_dir, Persistence, StorageConfig};
use crate::error::StorageError;
use crate::model::HabitData;

/// File-backed [`Persistence`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    backup_path: Option<PathBuf>,
}

impl JsonFileStore {
    /// Open the store inside the data directory as configured.
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let dir = data_dir()?;
        Ok(Self::in_dir(&dir, config))
    }

    /// Store rooted at `dir`, using the file names from `config`.
    pub fn in_dir(dir: &Path, config: &StorageConfig) -> Self {
        let backup_path = config
            .keep_backup
            .then(|| dir.join(&config.backup_file));
        Self {
            path: dir.join(&config.data_file),
            backup_path,
        }
    }

    /// Store with explicit paths.
    pub fn with_paths(path: PathBuf, backup_path: Option<PathBuf>) -> Self {
        Self { path, backup_path }
    }

    /// Path of the primary data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    fn read(path: &Path) -> Result<HabitData, StorageError> {
        let content = fs::read_to_string(path).map_err(|e| StorageError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| StorageError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn rotate_backup(&self) -> Result<(), StorageError> {
        let Some(backup) = &self.backup_path else {
            return Ok(());
        };
        if !self.path.exists() {
            return Ok(());
        }
        fs::copy(&self.path, backup)
            .map(|_| ())
            .map_err(|source| StorageError::BackupFailed {
                path: backup.clone(),
                source,
            })
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> HabitData {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no habit data yet, starting empty");
            return HabitData::new();
        }

        let err = match Self::read(&self.path) {
            Ok(data) => return data,
            Err(err) => err,
        };
        tracing::warn!(error = %err, "error loading habit data, trying backup");

        if let Some(backup) = self.backup_path.as_deref().filter(|p| p.exists()) {
            match Self::read(backup) {
                Ok(data) => return data,
                Err(backup_err) => {
                    tracing::warn!(error = %backup_err, "error loading backup");
                }
            }
        }
        HabitData::new()
    }

    fn save(&self, data: &HabitData) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;
        }
        self.rotate_backup()?;

        let content = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            habits = data.habits().len(),
            logs = data.logs().len(),
            "saved habit data"
        );
        Ok(())
    }
}
