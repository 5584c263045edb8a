//! Reminder commands.

use chrono::NaiveTime;
use habit_tracker_core::{reminder_message, Config, Notifier};

use super::{open_service, CommandResult};
use crate::{daemon, notify};

pub fn set(time: NaiveTime, watch: bool) -> CommandResult {
    let config = Config::load()?;
    let mut service = open_service(&config)?;

    service.set_alert_time(time)?;
    println!("✓ Alert set for {}", time.format("%H:%M"));

    if watch {
        daemon::run(&config, service)?;
    }
    Ok(())
}

pub fn disable() -> CommandResult {
    let mut service = open_service(&Config::load()?)?;
    service.disable_alert()?;
    println!("✓ Alerts disabled");
    Ok(())
}

pub fn show(json: bool) -> CommandResult {
    let service = open_service(&Config::load()?)?;
    let settings = service.alert_settings();

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }
    match settings {
        Some(s) if s.enabled => println!("Alert time: {}", s.alert_time.format("%H:%M")),
        Some(s) => println!("Alerts are disabled (last time: {})", s.alert_time.format("%H:%M")),
        None => println!("No alert configured"),
    }
    Ok(())
}

pub fn daemon() -> CommandResult {
    let config = Config::load()?;
    let service = open_service(&config)?;

    match service.alert_settings() {
        Some(settings) if settings.enabled => daemon::run(&config, service),
        _ => {
            println!("No alert configured or alerts are disabled. Use 'set-alert' first.");
            Ok(())
        }
    }
}

pub fn test_notification() -> CommandResult {
    let config = Config::load()?;
    let service = open_service(&config)?;
    let notifier = notify::from_config(&config.reminder);

    println!("Sending test notification via {}...", notifier.name());
    let message = reminder_message(service.list_habits().len());
    notifier.deliver(&config.reminder.title, &message)?;
    println!("Test notification sent successfully");
    Ok(())
}
