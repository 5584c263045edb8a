//! Core error types for habit-tracker-core.
//!
//! Validation rejections (duplicate or unknown habit names) are ordinary
//! outcomes and only surface as [`ValidationError`] inside the store; the
//! service turns them into `bool` results. Storage and delivery failures
//! propagate to the caller as [`CoreError`]; configuration calls return
//! [`ConfigError`] directly.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habit-tracker-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Reminder delivery failed
    #[error("Notification error: {0}")]
    Notification(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a persistence collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be resolved or created
    #[error("Failed to access data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the habit document failed
    #[error("Failed to read habit data from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// Writing the habit document failed
    #[error("Failed to save habit data to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rotating the previous document into the backup slot failed
    #[error("Failed to back up habit data to {path}: {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded
    #[error("Failed to serialize habit data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Saving was refused by the collaborator
    #[error("Save rejected: {0}")]
    Rejected(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit names must contain at least one character
    #[error("Habit name must not be empty")]
    EmptyName,

    /// A habit with this exact name already exists
    #[error("Habit already exists: {0}")]
    DuplicateHabit(String),

    /// No habit with this exact name exists
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    /// Calendar date could not be parsed
    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    /// Time of day could not be parsed
    #[error("Invalid time '{0}'. Use HH:MM (24-hour format)")]
    InvalidTime(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
