pub mod alert;
pub mod config;
pub mod habit;

use habit_tracker_core::{Config, HabitService, JsonFileStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the service over the configured JSON data file.
pub fn open_service(config: &Config) -> Result<HabitService<JsonFileStore>, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.storage)?;
    Ok(HabitService::open(store))
}

/// Print a rejection and exit non-zero, leaving state untouched.
pub fn reject(message: impl std::fmt::Display) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}

pub fn path() -> CommandResult {
    let config = Config::load()?;
    let service = open_service(&config)?;
    println!("{}", service.persistence().path().display());
    Ok(())
}
