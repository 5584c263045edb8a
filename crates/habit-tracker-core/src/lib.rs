//! # Habit Tracker Core Library
//!
//! This library provides the core logic for the habit tracker: named habits,
//! daily completion logs, streak computation and the daily reminder schedule.
//! The `habit-tracker` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Model**: [`HabitData`] is an immutable snapshot of habits, logs and
//!   alert settings
//! - **Store**: [`HabitStore`] applies invariant-preserving transitions that
//!   each produce a new snapshot
//! - **Service**: [`HabitService`] orchestrates the store, streak queries and
//!   the injected [`Persistence`] collaborator
//! - **Streaks**: pure functions over a log collection
//! - **Reminders**: timer-agnostic due checks; delivery goes through a
//!   host-provided [`Notifier`]
//! - **Storage**: JSON snapshot file and TOML configuration

pub mod error;
pub mod model;
pub mod reminder;
pub mod service;
pub mod storage;
pub mod store;
pub mod streak;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use model::{parse_date, parse_time, AlertSettings, Habit, HabitData, HabitLog};
pub use reminder::{is_due, reminder_message, Notifier, ReminderGate};
pub use service::{today, HabitService, HabitStatus};
pub use storage::{Config, JsonFileStore, MemoryStore, Persistence};
pub use store::HabitStore;
pub use streak::{current_streak, longest_streak, StreakSummary};
