//! In-memory habit store.
//!
//! [`HabitStore`] owns the current [`HabitData`] snapshot and replaces it
//! wholesale on every successful transition. A rejected transition leaves the
//! current snapshot untouched.
//!
//! Invariants maintained for snapshots produced here:
//! - habit names are non-empty and unique (exact, case-sensitive match)
//! - every log names a habit present in the same snapshot
//! - at most one log exists per `(habit_name, date)` pair

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::model::{AlertSettings, Habit, HabitData, HabitLog};

/// Holder of the current snapshot.
#[derive(Debug, Clone, Default)]
pub struct HabitStore {
    current: HabitData,
}

impl HabitStore {
    pub fn new(snapshot: HabitData) -> Self {
        Self { current: snapshot }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &HabitData {
        &self.current
    }

    /// Replace the current snapshot without validation, e.g. after a reload.
    pub fn replace(&mut self, snapshot: HabitData) {
        self.current = snapshot;
    }

    /// Append a habit created on `created_date`.
    pub fn add_habit(
        &mut self,
        name: &str,
        description: &str,
        created_date: NaiveDate,
    ) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.current.contains_habit(name) {
            return Err(ValidationError::DuplicateHabit(name.to_string()));
        }

        let (mut habits, logs, alert) = self.current.clone().into_parts();
        habits.push(Habit::new(name, description, created_date));
        self.current = HabitData::from_parts(habits, logs, alert);
        Ok(())
    }

    /// Remove a habit together with every log that names it.
    pub fn delete_habit(&mut self, name: &str) -> Result<(), ValidationError> {
        self.require_habit(name)?;

        let (habits, logs, alert) = self.current.clone().into_parts();
        let habits = habits.into_iter().filter(|h| h.name != name).collect();
        let logs = logs.into_iter().filter(|l| !l.is_for(name)).collect();
        self.current = HabitData::from_parts(habits, logs, alert);
        Ok(())
    }

    /// Record a completion for `(name, date)`, replacing any earlier entry for
    /// that pair.
    pub fn log_habit(&mut self, name: &str, date: NaiveDate) -> Result<(), ValidationError> {
        self.record(name, date, true)
    }

    /// Record `(name, date)` with the given completion flag. The previous
    /// entry for the pair, if any, is dropped and the new one appended.
    pub fn record(
        &mut self,
        name: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<(), ValidationError> {
        self.require_habit(name)?;

        let (habits, mut logs, alert) = self.current.clone().into_parts();
        logs.retain(|log| !(log.is_for(name) && log.date == date));
        logs.push(HabitLog {
            habit_name: name.to_string(),
            date,
            completed,
        });
        self.current = HabitData::from_parts(habits, logs, alert);
        Ok(())
    }

    /// Enable reminders at `time`, regardless of any prior settings.
    pub fn set_alert_time(&mut self, time: NaiveTime) {
        self.current = self
            .current
            .with_alert_settings(Some(AlertSettings::new(time)));
    }

    /// Disable reminders, keeping the configured time. Returns `false` and
    /// leaves the snapshot alone when no alert was ever set.
    pub fn disable_alert(&mut self) -> bool {
        match self.current.alert_settings() {
            Some(settings) => {
                self.current = self
                    .current
                    .with_alert_settings(Some(settings.with_enabled(false)));
                true
            }
            None => false,
        }
    }

    pub fn list_habits(&self) -> &[Habit] {
        self.current.habits()
    }

    pub fn logs_for_habit(&self, name: &str) -> Vec<HabitLog> {
        self.current.logs_for(name).cloned().collect()
    }

    pub fn is_logged_on(&self, name: &str, date: NaiveDate) -> bool {
        self.current.is_logged_on(name, date)
    }

    pub fn alert_settings(&self) -> Option<AlertSettings> {
        self.current.alert_settings()
    }

    fn require_habit(&self, name: &str) -> Result<(), ValidationError> {
        if self.current.contains_habit(name) {
            Ok(())
        } else {
            Err(ValidationError::HabitNotFound(name.to_string()))
        }
    }
}
