//! Habit data model.
//!
//! A [`HabitData`] snapshot is the whole persisted state: habits, their
//! completion logs and the optional reminder configuration. Snapshots are
//! values; mutation always builds a new one (see [`crate::store`]).
//!
//! Logs refer to habits by name only. Nothing here prevents a hand-edited
//! document from containing a log for a habit that does not exist; queries
//! simply never match such entries.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// A named recurring activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique, case-sensitive identifier.
    pub name: String,
    #[serde(with = "calendar_date")]
    pub created_date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Habit {
    pub fn new(name: impl Into<String>, description: impl Into<String>, created_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            created_date,
            description: description.into(),
        }
    }
}

/// Completion (or explicit non-completion) of a habit on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    pub habit_name: String,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default = "default_true")]
    pub completed: bool,
}

impl HabitLog {
    /// A completed log entry.
    pub fn completed(habit_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            habit_name: habit_name.into(),
            date,
            completed: true,
        }
    }

    /// A log entry recording that the habit was not done.
    pub fn missed(habit_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            habit_name: habit_name.into(),
            date,
            completed: false,
        }
    }

    pub fn is_for(&self, habit_name: &str) -> bool {
        self.habit_name == habit_name
    }
}

/// Daily reminder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    #[serde(with = "time_of_day")]
    pub alert_time: NaiveTime,
    pub enabled: bool,
}

impl AlertSettings {
    /// Enabled reminder at `alert_time`, truncated to minute precision.
    pub fn new(alert_time: NaiveTime) -> Self {
        Self {
            alert_time: truncate_to_minute(alert_time),
            enabled: true,
        }
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }
}

/// Immutable snapshot of all habit state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitData {
    #[serde(default, deserialize_with = "null_as_default")]
    habits: Vec<Habit>,
    #[serde(default, deserialize_with = "null_as_default")]
    logs: Vec<HabitLog>,
    #[serde(default)]
    alert_settings: Option<AlertSettings>,
}

impl HabitData {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        habits: Vec<Habit>,
        logs: Vec<HabitLog>,
        alert_settings: Option<AlertSettings>,
    ) -> Self {
        Self {
            habits,
            logs,
            alert_settings,
        }
    }

    /// Habits in insertion order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// All logs in insertion order.
    pub fn logs(&self) -> &[HabitLog] {
        &self.logs
    }

    pub fn alert_settings(&self) -> Option<AlertSettings> {
        self.alert_settings
    }

    pub fn find_habit(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.name == name)
    }

    pub fn contains_habit(&self, name: &str) -> bool {
        self.find_habit(name).is_some()
    }

    /// Logs for one habit in insertion order, completed or not.
    pub fn logs_for<'a>(&'a self, habit_name: &'a str) -> impl Iterator<Item = &'a HabitLog> + 'a {
        self.logs.iter().filter(move |log| log.is_for(habit_name))
    }

    /// True only for a completed log on exactly `date`.
    pub fn is_logged_on(&self, habit_name: &str, date: NaiveDate) -> bool {
        self.logs
            .iter()
            .any(|log| log.is_for(habit_name) && log.date == date && log.completed)
    }

    /// Logs whose habit is missing from this snapshot.
    pub fn orphaned_logs(&self) -> impl Iterator<Item = &HabitLog> {
        self.logs
            .iter()
            .filter(move |log| !self.contains_habit(&log.habit_name))
    }

    pub fn with_alert_settings(&self, alert_settings: Option<AlertSettings>) -> Self {
        Self {
            habits: self.habits.clone(),
            logs: self.logs.clone(),
            alert_settings,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Habit>, Vec<HabitLog>, Option<AlertSettings>) {
        (self.habits, self.logs, self.alert_settings)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), calendar_date::FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Parse an `HH:MM` 24-hour time of day.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), time_of_day::FORMAT)
        .map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    use chrono::Timelike;
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

fn default_true() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `YYYY-MM-DD` on write; also reads `[y, m, d]` arrays written by older
/// tooling.
mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Parts(i32, u32, u32),
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => NaiveDate::parse_from_str(&text, FORMAT)
                .map_err(|e| de::Error::custom(format!("invalid date '{text}': {e}"))),
            Repr::Parts(y, m, d) => NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| de::Error::custom(format!("invalid date [{y}, {m}, {d}]"))),
        }
    }
}

/// `HH:MM` on write; reads `HH:MM`, `HH:MM:SS` or `[h, m(, s)]`.
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Parts(Vec<u32>),
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let time = match Repr::deserialize(deserializer)? {
            Repr::Text(text) => NaiveTime::parse_from_str(&text, FORMAT)
                .or_else(|_| NaiveTime::parse_from_str(&text, "%H:%M:%S"))
                .map_err(|e| de::Error::custom(format!("invalid time '{text}': {e}")))?,
            Repr::Parts(parts) => match parts.as_slice() {
                [h, m] | [h, m, _] => NaiveTime::from_hms_opt(*h, *m, 0)
                    .ok_or_else(|| de::Error::custom(format!("invalid time {parts:?}")))?,
                _ => return Err(de::Error::custom(format!("invalid time {parts:?}"))),
            },
        };
        Ok(super::truncate_to_minute(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_document_field_names() {
        let data = HabitData::from_parts(
            vec![Habit::new("Run", "5k", date(2024, 1, 1))],
            vec![HabitLog::completed("Run", date(2024, 1, 2))],
            Some(AlertSettings::new(NaiveTime::from_hms_opt(19, 30, 0).unwrap())),
        );

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["habits"][0]["name"], "Run");
        assert_eq!(json["habits"][0]["createdDate"], "2024-01-01");
        assert_eq!(json["habits"][0]["description"], "5k");
        assert_eq!(json["logs"][0]["habitName"], "Run");
        assert_eq!(json["logs"][0]["date"], "2024-01-02");
        assert_eq!(json["logs"][0]["completed"], true);
        assert_eq!(json["alertSettings"]["alertTime"], "19:30");
        assert_eq!(json["alertSettings"]["enabled"], true);
    }

    #[test]
    fn test_absent_alert_settings_serialize_as_null() {
        let json = serde_json::to_value(HabitData::new()).unwrap();
        assert!(json["alertSettings"].is_null());
        assert_eq!(json["habits"], serde_json::json!([]));
    }

    #[test]
    fn test_lenient_document_decoding() {
        let raw = r#"{
            "habits": [{"name": "Read", "createdDate": [2024, 3, 9], "description": null}],
            "logs": null,
            "alertSettings": {"alertTime": "07:15:00", "enabled": false}
        }"#;
        let data: HabitData = serde_json::from_str(raw).unwrap();

        assert_eq!(data.habits()[0].created_date, date(2024, 3, 9));
        assert_eq!(data.habits()[0].description, "");
        assert!(data.logs().is_empty());
        let alert = data.alert_settings().unwrap();
        assert_eq!(alert.alert_time, NaiveTime::from_hms_opt(7, 15, 0).unwrap());
        assert!(!alert.enabled);
    }

    #[test]
    fn test_log_completed_defaults_to_true() {
        let log: HabitLog =
            serde_json::from_str(r#"{"habitName": "Run", "date": "2024-01-01"}"#).unwrap();
        assert!(log.completed);
    }

    #[test]
    fn test_is_logged_on_ignores_missed_entries() {
        let data = HabitData::from_parts(
            vec![Habit::new("Run", "", date(2024, 1, 1))],
            vec![HabitLog::missed("Run", date(2024, 1, 2))],
            None,
        );
        assert!(!data.is_logged_on("Run", date(2024, 1, 2)));
        assert_eq!(data.logs_for("Run").count(), 1);
    }

    #[test]
    fn test_orphaned_logs() {
        let data = HabitData::from_parts(
            vec![Habit::new("Run", "", date(2024, 1, 1))],
            vec![
                HabitLog::completed("Run", date(2024, 1, 2)),
                HabitLog::completed("Ghost", date(2024, 1, 2)),
            ],
            None,
        );
        let orphans: Vec<_> = data.orphaned_logs().collect();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].habit_name, "Ghost");
    }

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
        assert_eq!(
            parse_date("2024/02/29"),
            Err(ValidationError::InvalidDate("2024/02/29".to_string()))
        );
        assert_eq!(
            parse_time("19:30").unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_alert_settings_truncate_seconds() {
        let settings = AlertSettings::new(NaiveTime::from_hms_opt(8, 0, 42).unwrap());
        assert_eq!(settings.alert_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }
}
