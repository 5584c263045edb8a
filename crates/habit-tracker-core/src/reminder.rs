//! Daily reminder scheduling.
//!
//! The core never runs a timer. A host polls [`ReminderGate::poll`] on its
//! own schedule (the CLI daemon ticks every 30 seconds by default), passing
//! the alert settings it just re-read, and hands the message to a
//! [`Notifier`] when the gate opens.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::Result;
use crate::model::AlertSettings;

/// Longest poll interval that still lands inside every wall-clock minute.
pub const MAX_POLL_INTERVAL_SECS: u64 = 60;

/// Delivers a reminder to the user. Implemented per platform by the host.
pub trait Notifier {
    /// Short identifier used in logs (e.g. "osascript", "stdout").
    fn name(&self) -> &str;

    fn deliver(&self, title: &str, message: &str) -> Result<()>;
}

/// True when reminders are enabled and `now` falls in the configured minute.
pub fn is_due(settings: Option<AlertSettings>, now: NaiveTime) -> bool {
    match settings {
        Some(settings) if settings.enabled => {
            settings.alert_time.hour() == now.hour() && settings.alert_time.minute() == now.minute()
        }
        _ => false,
    }
}

/// Reminder text for the current number of habits.
pub fn reminder_message(habit_count: usize) -> String {
    format!(
        "Time to check your {} habit{}!",
        habit_count,
        if habit_count == 1 { "" } else { "s" }
    )
}

/// Fires at most once per calendar minute, however often it is polled.
#[derive(Debug, Clone, Default)]
pub struct ReminderGate {
    last_fired: Option<(NaiveDate, u32, u32)>,
}

impl ReminderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a reminder should be delivered now. Settings are taken
    /// fresh on every call, so enabling, disabling or moving the alert takes
    /// effect on the next poll.
    pub fn poll(&mut self, settings: Option<AlertSettings>, now: NaiveDateTime) -> bool {
        if !is_due(settings, now.time()) {
            return false;
        }

        let slot = (now.date(), now.hour(), now.minute());
        if self.last_fired == Some(slot) {
            return false;
        }
        self.last_fired = Some(slot);
        true
    }
}
