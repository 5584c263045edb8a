//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Data file names and backup behavior
//! - Reminder polling interval, title and delivery command
//!
//! Configuration is stored as `config.toml` in [`data_dir`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::reminder::MAX_POLL_INTERVAL_SECS;

/// Where and how habit data is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_backup_file")]
    pub backup_file: String,
    #[serde(default = "default_true")]
    pub keep_backup: bool,
}

/// Reminder daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_title")]
    pub title: String,
    /// Program used to deliver reminders instead of the platform default.
    /// Receives the title and message as its last two arguments.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

/// Application configuration.
///
/// Serialized to/from TOML at [`Config::path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
}

// Default functions
fn default_data_file() -> String {
    "habits.json".into()
}
fn default_backup_file() -> String {
    "habits_backup.json".into()
}
fn default_true() -> bool {
    true
}
fn default_poll_interval_secs() -> u64 {
    30
}
fn default_title() -> String {
    "Habit Tracker Reminder".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_file: default_backup_file(),
            keep_backup: true,
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            title: default_title(),
            command: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                // Optional values start out as null; JSON arrays fill a command,
                // "null"/"" clear it, anything else is kept as a string.
                serde_json::Value::Null => match value.trim() {
                    "" | "null" => serde_json::Value::Null,
                    v if v.starts_with('[') => {
                        serde_json::from_str(v).map_err(|e| invalid(e.to_string()))?
                    }
                    v => serde_json::Value::String(v.into()),
                },
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of `config.toml` inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. Returns error if key is
    /// unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values that would leave the application unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_POLL_INTERVAL_SECS).contains(&self.reminder.poll_interval_secs) {
            return Err(ConfigError::InvalidValue {
                key: "reminder.poll_interval_secs".into(),
                message: format!("must be between 1 and {MAX_POLL_INTERVAL_SECS}"),
            });
        }
        if self.storage.data_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage.data_file".into(),
                message: "must not be empty".into(),
            });
        }
        if self.storage.keep_backup && self.storage.backup_file == self.storage.data_file {
            return Err(ConfigError::InvalidValue {
                key: "storage.backup_file".into(),
                message: "must differ from storage.data_file".into(),
            });
        }
        if matches!(&self.reminder.command, Some(cmd) if cmd.is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "reminder.command".into(),
                message: "must name a program".into(),
            });
        }
        Ok(())
    }
}
