//! Habit service: the operations the CLI and daemon call.
//!
//! Every successful mutation of the [`HabitStore`] is followed immediately by
//! a save of the new snapshot. A failed save is returned to the caller but the
//! in-memory mutation stands; nothing is rolled back or retried.
//!
//! The service is not synchronized. Hosts with several threads must serialize
//! access themselves.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::model::{AlertSettings, Habit, HabitData, HabitLog};
use crate::storage::Persistence;
use crate::store::HabitStore;
use crate::streak;

/// Per-habit status on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatus {
    pub name: String,
    pub description: String,
    pub created_date: NaiveDate,
    /// Completed log exists for the requested date.
    pub logged: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Coordinates the store, streak queries and persistence.
pub struct HabitService<P: Persistence> {
    store: HabitStore,
    persistence: P,
}

impl<P: Persistence> HabitService<P> {
    /// Load the current snapshot from `persistence`.
    pub fn open(persistence: P) -> Self {
        let snapshot = persistence.load();
        let orphans = snapshot.orphaned_logs().count();
        if orphans > 0 {
            tracing::warn!(orphans, "habit data contains logs for unknown habits");
        }
        Self {
            store: HabitStore::new(snapshot),
            persistence,
        }
    }

    /// Re-read the snapshot from persistence, discarding in-memory state.
    pub fn reload(&mut self) {
        self.store.replace(self.persistence.load());
    }

    pub fn snapshot(&self) -> &HabitData {
        self.store.snapshot()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Add a habit created today. `Ok(false)` when the name is taken or empty.
    pub fn add_habit(&mut self, name: &str, description: &str) -> Result<bool> {
        self.add_habit_on(name, description, today())
    }

    /// Add a habit with an explicit creation date.
    pub fn add_habit_on(&mut self, name: &str, description: &str, created: NaiveDate) -> Result<bool> {
        self.apply("add_habit", |store| store.add_habit(name, description, created))
    }

    /// Delete a habit and all its logs. `Ok(false)` when it does not exist.
    pub fn delete_habit(&mut self, name: &str) -> Result<bool> {
        self.apply("delete_habit", |store| store.delete_habit(name))
    }

    pub fn list_habits(&self) -> Vec<Habit> {
        self.store.list_habits().to_vec()
    }

    /// Mark `name` completed on `date`. `Ok(false)` when the habit is unknown.
    pub fn log_habit(&mut self, name: &str, date: NaiveDate) -> Result<bool> {
        self.apply("log_habit", |store| store.log_habit(name, date))
    }

    /// Record that `name` was explicitly not done on `date`.
    pub fn mark_missed(&mut self, name: &str, date: NaiveDate) -> Result<bool> {
        self.apply("mark_missed", |store| store.record(name, date, false))
    }

    pub fn is_habit_logged_for_date(&self, name: &str, date: NaiveDate) -> bool {
        self.store.is_logged_on(name, date)
    }

    pub fn logs_for_habit(&self, name: &str) -> Vec<HabitLog> {
        self.store.logs_for_habit(name)
    }

    pub fn current_streak(&self, name: &str, reference_date: NaiveDate) -> u32 {
        streak::current_streak(name, self.snapshot().logs(), reference_date)
    }

    pub fn longest_streak(&self, name: &str) -> u32 {
        streak::longest_streak(name, self.snapshot().logs())
    }

    /// Status of every habit on `date`, in insertion order.
    pub fn status(&self, date: NaiveDate) -> Vec<HabitStatus> {
        let logs = self.snapshot().logs();
        self.store
            .list_habits()
            .iter()
            .map(|habit| {
                let streaks = streak::summarize(&habit.name, logs, date);
                HabitStatus {
                    name: habit.name.clone(),
                    description: habit.description.clone(),
                    created_date: habit.created_date,
                    logged: self.store.is_logged_on(&habit.name, date),
                    current_streak: streaks.current,
                    longest_streak: streaks.longest,
                }
            })
            .collect()
    }

    /// Enable a daily reminder at `time`.
    pub fn set_alert_time(&mut self, time: NaiveTime) -> Result<()> {
        self.store.set_alert_time(time);
        self.persist("set_alert_time")
    }

    /// Disable the reminder. Nothing is saved when no alert was ever set.
    pub fn disable_alert(&mut self) -> Result<()> {
        if self.store.disable_alert() {
            self.persist("disable_alert")?;
        }
        Ok(())
    }

    pub fn alert_settings(&self) -> Option<AlertSettings> {
        self.store.alert_settings()
    }

    fn apply<F>(&mut self, op: &str, transition: F) -> Result<bool>
    where
        F: FnOnce(&mut HabitStore) -> std::result::Result<(), ValidationError>,
    {
        match transition(&mut self.store) {
            Ok(()) => {
                self.persist(op)?;
                Ok(true)
            }
            Err(rejection) => {
                tracing::debug!(op, %rejection, "rejected");
                Ok(false)
            }
        }
    }

    fn persist(&self, op: &str) -> Result<()> {
        tracing::debug!(op, "saving snapshot");
        self.persistence.save(self.store.snapshot())?;
        Ok(())
    }
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
