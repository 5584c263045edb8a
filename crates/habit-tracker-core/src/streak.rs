//! Consecutive-day streak computation.
//!
//! Both calculations look only at logs for one habit with `completed = true`
//! and treat their dates as a set, so duplicate entries and input order do not
//! matter. Nothing is cached; every call scans the full log history.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::model::HabitLog;

/// Current and longest streak of one habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// Consecutive completed days ending at the reference date.
    pub current: u32,
    /// Longest run of consecutive completed days across all history.
    pub longest: u32,
}

/// Sorted, de-duplicated completion dates for `habit_name`.
pub fn completed_dates<'a, I>(habit_name: &str, logs: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a HabitLog>,
{
    logs.into_iter()
        .filter(|log| log.completed && log.is_for(habit_name))
        .map(|log| log.date)
        .collect()
}

/// Count of consecutive completed days walking backward from
/// `reference_date` (inclusive). Zero when `reference_date` itself has no
/// completed log.
pub fn current_streak(habit_name: &str, logs: &[HabitLog], reference_date: NaiveDate) -> u32 {
    let dates = completed_dates(habit_name, logs);

    let mut streak = 0;
    let mut day = Some(reference_date);
    while let Some(d) = day.filter(|d| dates.contains(d)) {
        streak += 1;
        day = d.pred_opt();
    }
    streak
}

/// Length of the longest run of consecutive completed calendar days.
pub fn longest_streak(habit_name: &str, logs: &[HabitLog]) -> u32 {
    let dates = completed_dates(habit_name, logs);

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        run = match previous.and_then(|p| p.succ_opt()) {
            Some(next) if next == date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

/// Both streaks for `habit_name` in one call.
pub fn summarize(habit_name: &str, logs: &[HabitLog], reference_date: NaiveDate) -> StreakSummary {
    StreakSummary {
        current: current_streak(habit_name, logs, reference_date),
        longest: longest_streak(habit_name, logs),
    }
}
