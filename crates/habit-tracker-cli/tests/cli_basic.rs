//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

mod common;

use common::{assert_contains, Cli};

#[test]
fn test_list_empty() {
    let cli = Cli::new();
    let out = cli.success(&["list"]);
    assert_contains(&out, "No habits tracked yet");
    assert_eq!(cli.json(&["list", "--json"]), serde_json::json!([]));
}

#[test]
fn test_add_and_list() {
    let cli = Cli::new();
    let out = cli.success(&["add", "Morning Run", "Run", "for", "30", "minutes"]);
    assert_contains(&out, "✓ Added habit: Morning Run");
    cli.success(&["add", "Read"]);

    let habits = cli.json(&["list", "--json"]);
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 2);
    assert_eq!(habits[0]["name"], "Morning Run");
    assert_eq!(habits[0]["description"], "Run for 30 minutes");
    assert_eq!(habits[1]["name"], "Read");

    let out = cli.success(&["list"]);
    assert_contains(&out, "• Morning Run - Run for 30 minutes (created: ");
    assert_contains(&out, "• Read (created: ");
}

#[test]
fn test_duplicate_add_rejected() {
    let cli = Cli::new();
    cli.success(&["add", "Run"]);
    let (_, stderr, code) = cli.failure(&["add", "Run"]);
    assert_eq!(code, 1);
    assert_contains(&stderr, "Habit already exists: Run");

    cli.success(&["add", "run"]);
    assert_eq!(cli.json(&["list", "--json"]).as_array().unwrap().len(), 2);
}

#[test]
fn test_empty_name_rejected() {
    let cli = Cli::new();
    cli.failure(&["add", ""]);
    assert_eq!(cli.json(&["list", "--json"]), serde_json::json!([]));
}

#[test]
fn test_log_reports_streak() {
    let cli = Cli::new();
    cli.success(&["add", "Run"]);
    cli.success(&["log", "Run", "2024-01-01"]);
    cli.success(&["log", "Run", "2024-01-02"]);
    let out = cli.success(&["log", "Run", "2024-01-03"]);

    assert_contains(&out, "✓ Logged habit 'Run' for 2024-01-03");
    assert_contains(&out, "Current streak: 3 days");
}

#[test]
fn test_log_unknown_habit() {
    let cli = Cli::new();
    let (_, stderr, _) = cli.failure(&["log", "Run", "2024-01-01"]);
    assert_contains(&stderr, "Habit not found: Run");
}

#[test]
fn test_log_invalid_date() {
    let cli = Cli::new();
    cli.success(&["add", "Run"]);
    let (_, stderr, _) = cli.failure(&["log", "Run", "01/02/2024"]);
    assert_contains(&stderr, "YYYY-MM-DD");
}

#[test]
fn test_status_json() {
    let cli = Cli::new();
    cli.success(&["add", "H"]);
    cli.success(&["add", "Idle"]);
    for day in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05", "2024-01-06"] {
        cli.success(&["log", "H", day]);
    }

    let status = cli.json(&["status", "2024-01-06", "--json"]);
    assert_eq!(status[0]["name"], "H");
    assert_eq!(status[0]["logged"], true);
    assert_eq!(status[0]["currentStreak"], 2);
    assert_eq!(status[0]["longestStreak"], 3);
    assert_eq!(status[1]["logged"], false);
    assert_eq!(status[1]["longestStreak"], 0);

    let out = cli.success(&["status", "2024-01-06"]);
    assert_contains(&out, "Habit Status for 2024-01-06:");
    assert_contains(&out, "• H: ✓ (streak: 2, best: 3)");
    assert_contains(&out, "• Idle: ✗ (streak: 0, best: 0)");
}

#[test]
fn test_missed_log_breaks_streak() {
    let cli = Cli::new();
    cli.success(&["add", "H"]);
    cli.success(&["log", "H", "2024-01-01"]);
    cli.success(&["log", "H", "2024-01-02"]);
    let out = cli.success(&["log", "H", "2024-01-02", "--missed"]);
    assert_contains(&out, "Current streak: 0 days");

    let status = cli.json(&["status", "2024-01-01", "--json"]);
    assert_eq!(status[0]["currentStreak"], 1);
    assert_eq!(status[0]["longestStreak"], 1);
}

#[test]
fn test_delete_cascades() {
    let cli = Cli::new();
    cli.success(&["add", "Run"]);
    cli.success(&["log", "Run", "2024-01-01"]);
    let out = cli.success(&["delete", "Run"]);
    assert_contains(&out, "✓ Deleted habit: Run");

    let (_, stderr, _) = cli.failure(&["delete", "Run"]);
    assert_contains(&stderr, "Habit not found: Run");

    cli.success(&["add", "Run"]);
    let status = cli.json(&["status", "2024-01-01", "--json"]);
    assert_eq!(status[0]["logged"], false);
}

#[test]
fn test_alert_lifecycle() {
    let cli = Cli::new();
    assert_contains(&cli.success(&["alert"]), "No alert configured");

    cli.success(&["disable-alert"]);
    assert_eq!(cli.json(&["alert", "--json"]), serde_json::Value::Null);

    assert_contains(&cli.success(&["set-alert", "19:30"]), "✓ Alert set for 19:30");
    assert_eq!(
        cli.json(&["alert", "--json"]),
        serde_json::json!({"alertTime": "19:30", "enabled": true})
    );

    cli.success(&["disable-alert"]);
    assert_contains(&cli.success(&["alert"]), "Alerts are disabled (last time: 19:30)");
}

#[test]
fn test_set_alert_invalid_time() {
    let cli = Cli::new();
    let (_, stderr, _) = cli.failure(&["set-alert", "7pm"]);
    assert_contains(&stderr, "HH:MM");
}

#[test]
fn test_daemon_without_alert_exits() {
    let cli = Cli::new();
    let out = cli.success(&["daemon"]);
    assert_contains(&out, "Use 'set-alert' first");
}

#[test]
fn test_data_file_format() {
    let cli = Cli::new();
    cli.success(&["add", "Run", "daily"]);
    cli.success(&["log", "Run", "2024-01-01"]);
    cli.success(&["set-alert", "07:05"]);

    let path = cli.success(&["path"]);
    assert_eq!(path.trim(), cli.home().join("habits.json").display().to_string());

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path.trim()).unwrap()).unwrap();
    assert_eq!(doc["habits"][0]["name"], "Run");
    assert_eq!(doc["habits"][0]["description"], "daily");
    assert_eq!(
        doc["logs"][0],
        serde_json::json!({"habitName": "Run", "date": "2024-01-01", "completed": true})
    );
    assert_eq!(doc["alertSettings"]["alertTime"], "07:05");
    assert!(cli.home().join("habits_backup.json").exists());
}

#[test]
fn test_config_get_set() {
    let cli = Cli::new();
    assert_eq!(cli.success(&["config", "get", "reminder.poll_interval_secs"]).trim(), "30");

    let out = cli.success(&["config", "set", "storage.data_file", "tracked.json"]);
    assert_contains(&out, "✓ storage.data_file = tracked.json");
    cli.success(&["add", "Run"]);
    assert!(cli.home().join("tracked.json").exists());

    cli.failure(&["config", "get", "reminder.volume"]);
    cli.failure(&["config", "set", "reminder.poll_interval_secs", "0"]);
    let (_, stderr, _) = cli.failure(&["config", "set", "reminder.poll_interval_secs", "61"]);
    assert_contains(&stderr, "must be between 1 and 60");

    cli.success(&["config", "reset"]);
    assert_eq!(cli.success(&["config", "get", "storage.data_file"]).trim(), "habits.json");
}

#[test]
fn test_test_notification_with_configured_command() {
    let cli = Cli::new();
    cli.success(&["config", "set", "reminder.command", r#"["true"]"#]);
    let out = cli.success(&["test-notification"]);
    assert_contains(&out, "via true");
    assert_contains(&out, "Test notification sent successfully");
}

#[test]
fn test_completions() {
    let cli = Cli::new();
    let out = cli.success(&["completions", "bash"]);
    assert_contains(&out, "habit-tracker");
}
