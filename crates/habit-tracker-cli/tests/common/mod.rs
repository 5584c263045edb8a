//! Common utilities for CLI E2E tests.

#![allow(dead_code)]

use std::process::Command;
use tempfile::TempDir;

/// A CLI bound to its own throwaway data directory.
pub struct Cli {
    home: TempDir,
}

impl Cli {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn home(&self) -> &std::path::Path {
        self.home.path()
    }

    /// Invoke a CLI command and return (stdout, stderr, exit code).
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_habit-tracker"))
            .args(args)
            .env("HABIT_TRACKER_HOME", self.home.path())
            .env_remove("HABIT_TRACKER_LOG")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        (stdout, stderr, code)
    }

    /// Invoke a CLI command and expect success.
    pub fn success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "CLI command failed with code {code}: {args:?}\n{stderr}");
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {args:?}");
        (stdout, stderr, code)
    }

    /// Invoke a CLI command expecting JSON on stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.success(args)).expect("Failed to parse JSON output")
    }
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack,
        needle
    );
}
