//! Foreground reminder loop.
//!
//! Ticks every `reminder.poll_interval_secs`, re-reads the habit data so alert
//! changes made by other invocations are picked up, and delivers at most one
//! reminder per matching minute. Ctrl+C stops the loop.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use habit_tracker_core::reminder::MAX_POLL_INTERVAL_SECS;
use habit_tracker_core::storage::ReminderConfig;
use habit_tracker_core::{reminder_message, Config, HabitService, Notifier, Persistence, ReminderGate};
use tokio::time::MissedTickBehavior;

use crate::notify;

pub fn run<P: Persistence>(config: &Config, mut service: HabitService<P>) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = notify::from_config(&config.reminder);
    let interval = poll_interval(&config.reminder);

    if let Some(settings) = service.alert_settings() {
        println!(
            "Scheduling notifications for {} (checking every {}s)",
            settings.alert_time.format("%H:%M"),
            interval.as_secs()
        );
    }
    println!("Press Ctrl+C to stop...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(&mut service, &notifier, &config.reminder.title, interval));

    println!("\nStopping notifications...");
    Ok(())
}

/// Configured poll interval, clamped so no minute can fall between two ticks.
/// Hand-edited config files are not validated on load.
fn poll_interval(config: &ReminderConfig) -> Duration {
    Duration::from_secs(config.poll_interval_secs.clamp(1, MAX_POLL_INTERVAL_SECS))
}

async fn watch<P: Persistence>(
    service: &mut HabitService<P>,
    notifier: &dyn Notifier,
    title: &str,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut gate = ReminderGate::new();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick(service, &mut gate, notifier, title, Local::now().naive_local());
            }
            _ = &mut shutdown => break,
        }
    }
}

/// One poll: reload, check the gate, deliver. Returns true if a reminder was
/// delivered.
fn tick<P: Persistence>(
    service: &mut HabitService<P>,
    gate: &mut ReminderGate,
    notifier: &dyn Notifier,
    title: &str,
    now: NaiveDateTime,
) -> bool {
    service.reload();
    if !gate.poll(service.alert_settings(), now) {
        return false;
    }

    let message = reminder_message(service.list_habits().len());
    tracing::info!(at = %now.format("%Y-%m-%d %H:%M"), "alert time reached");
    match notifier.deliver(title, &message) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "failed to send notification");
            false
        }
    }
}
