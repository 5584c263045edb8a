//! Habit and log commands.

use chrono::NaiveDate;
use habit_tracker_core::{today, Config};

use super::{open_service, reject, CommandResult};

pub fn add(name: &str, description: &str) -> CommandResult {
    let mut service = open_service(&Config::load()?)?;

    if service.add_habit(name, description)? {
        println!("✓ Added habit: {name}");
        Ok(())
    } else {
        reject(format!("Habit already exists: {name}"))
    }
}

pub fn delete(name: &str) -> CommandResult {
    let mut service = open_service(&Config::load()?)?;

    if service.delete_habit(name)? {
        println!("✓ Deleted habit: {name}");
        Ok(())
    } else {
        reject(format!("Habit not found: {name}"))
    }
}

pub fn list(json: bool) -> CommandResult {
    let service = open_service(&Config::load()?)?;
    let habits = service.list_habits();

    if json {
        println!("{}", serde_json::to_string_pretty(&habits)?);
        return Ok(());
    }
    if habits.is_empty() {
        println!("No habits tracked yet. Use 'add' to create your first habit.");
        return Ok(());
    }

    println!("Tracked Habits:");
    for habit in &habits {
        if habit.description.is_empty() {
            println!("• {} (created: {})", habit.name, habit.created_date);
        } else {
            println!(
                "• {} - {} (created: {})",
                habit.name, habit.description, habit.created_date
            );
        }
    }
    Ok(())
}

pub fn log(name: &str, date: Option<NaiveDate>, missed: bool) -> CommandResult {
    let mut service = open_service(&Config::load()?)?;
    let date = date.unwrap_or_else(today);

    let recorded = if missed {
        service.mark_missed(name, date)?
    } else {
        service.log_habit(name, date)?
    };
    if !recorded {
        reject(format!("Habit not found: {name}"));
    }

    let streak = service.current_streak(name, date);
    if missed {
        println!("✓ Marked habit '{name}' as missed for {date}");
    } else {
        println!("✓ Logged habit '{name}' for {date}");
    }
    println!("Current streak: {} day{}", streak, if streak == 1 { "" } else { "s" });
    Ok(())
}

pub fn status(date: Option<NaiveDate>, json: bool) -> CommandResult {
    let service = open_service(&Config::load()?)?;
    let date = date.unwrap_or_else(today);
    let status = service.status(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    if status.is_empty() {
        println!("No habits tracked yet.");
        return Ok(());
    }

    println!("Habit Status for {date}:");
    for habit in &status {
        println!(
            "• {}: {} (streak: {}, best: {})",
            habit.name,
            if habit.logged { "✓" } else { "✗" },
            habit.current_streak,
            habit.longest_streak
        );
    }
    Ok(())
}
