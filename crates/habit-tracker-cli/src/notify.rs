//! Reminder delivery for the host platform.
//!
//! A configured `reminder.command` takes precedence. Otherwise macOS uses
//! `osascript`, Linux uses `notify-send`, and everything falls back to
//! printing the reminder on stdout.

use std::process::Command;

use habit_tracker_core::storage::ReminderConfig;
use habit_tracker_core::{CoreError, Notifier};

type Result<T> = habit_tracker_core::error::Result<T>;

/// Runs an external program with the title and message appended as its last
/// two arguments.
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Notifier for CommandNotifier {
    fn name(&self) -> &str {
        &self.program
    }

    fn deliver(&self, title: &str, message: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(title)
            .arg(message)
            .status()?;
        check_status(&self.program, status)
    }
}

/// macOS Notification Center through AppleScript.
pub struct AppleScriptNotifier;

impl Notifier for AppleScriptNotifier {
    fn name(&self) -> &str {
        "osascript"
    }

    fn deliver(&self, title: &str, message: &str) -> Result<()> {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(message),
            escape_applescript(title)
        );
        let status = Command::new("osascript").arg("-e").arg(script).status()?;
        check_status("osascript", status)
    }
}

/// Prints the reminder. Never fails.
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn name(&self) -> &str {
        "stdout"
    }

    fn deliver(&self, title: &str, message: &str) -> Result<()> {
        println!("🔔 {title}: {message}");
        Ok(())
    }
}

/// Tries each notifier in order until one succeeds.
pub struct ChainNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl ChainNotifier {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }
}

impl Notifier for ChainNotifier {
    fn name(&self) -> &str {
        self.notifiers.first().map_or("none", |n| n.name())
    }

    fn deliver(&self, title: &str, message: &str) -> Result<()> {
        let mut failures = Vec::new();
        for notifier in &self.notifiers {
            match notifier.deliver(title, message) {
                Ok(()) => {
                    tracing::debug!(via = notifier.name(), "reminder delivered");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(via = notifier.name(), error = %e, "delivery failed");
                    failures.push(format!("{}: {e}", notifier.name()));
                }
            }
        }
        Err(CoreError::Notification(if failures.is_empty() {
            "no notifier configured".to_string()
        } else {
            failures.join("; ")
        }))
    }
}

/// Notifier chain for this platform and configuration.
pub fn from_config(config: &ReminderConfig) -> ChainNotifier {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    if let Some((program, args)) = config.command.as_deref().and_then(|c| c.split_first()) {
        notifiers.push(Box::new(CommandNotifier::new(program.clone(), args.to_vec())));
    } else if cfg!(target_os = "macos") {
        notifiers.push(Box::new(AppleScriptNotifier));
    } else if cfg!(target_os = "linux") {
        notifiers.push(Box::new(CommandNotifier::new("notify-send", Vec::new())));
    }
    notifiers.push(Box::new(StdoutNotifier));

    ChainNotifier::new(notifiers)
}

fn check_status(program: &str, status: std::process::ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(CoreError::Notification(format!("{program} exited with {status}")))
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
