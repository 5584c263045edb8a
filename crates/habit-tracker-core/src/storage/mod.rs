mod config;
mod json_store;

pub use config::{Config, ReminderConfig, StorageConfig};
pub use json_store::JsonFileStore;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::model::HabitData;

/// Read/write capability over an opaque [`HabitData`] snapshot.
///
/// `load` never fails: unreadable or absent state yields an empty snapshot.
/// `save` must either persist the whole snapshot or report an error.
pub trait Persistence {
    fn load(&self) -> HabitData;

    fn save(&self, data: &HabitData) -> Result<(), StorageError>;
}

impl<P: Persistence + ?Sized> Persistence for &P {
    fn load(&self) -> HabitData {
        (**self).load()
    }

    fn save(&self, data: &HabitData) -> Result<(), StorageError> {
        (**self).save(data)
    }
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn load(&self) -> HabitData {
        (**self).load()
    }

    fn save(&self, data: &HabitData) -> Result<(), StorageError> {
        (**self).save(data)
    }
}

/// Volatile persistence. Clones share the same slot, so a test can keep a
/// handle and inspect what the service saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    saved: HabitData,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `data` already stored.
    pub fn with_data(data: HabitData) -> Self {
        let store = Self::default();
        store.state().saved = data;
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.state().fail_saves = fail;
    }

    /// Last successfully saved snapshot.
    pub fn saved(&self) -> HabitData {
        self.state().saved.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.state().saves
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> HabitData {
        self.state().saved.clone()
    }

    fn save(&self, data: &HabitData) -> Result<(), StorageError> {
        let mut state = self.state();
        if state.fail_saves {
            return Err(StorageError::Rejected("memory store is read-only".into()));
        }
        state.saved = data.clone();
        state.saves += 1;
        Ok(())
    }
}

/// Returns the directory holding habit data and `config.toml`.
///
/// `HABIT_TRACKER_HOME` wins when set. Otherwise `~/.config/habit-tracker`,
/// or `~/.config/habit-tracker-dev` when `HABIT_TRACKER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("HABIT_TRACKER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABIT_TRACKER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habit-tracker-dev")
            } else {
                base_dir.join("habit-tracker")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
