use chrono::{NaiveDate, NaiveTime};
use clap::builder::NonEmptyStringValueParser;
use clap::{CommandFactory, Parser, Subcommand};
use habit_tracker_core::{parse_date, parse_time};

mod commands;
mod daemon;
mod notify;

#[derive(Parser)]
#[command(name = "habit-tracker", version, about = "Track daily habits, streaks and reminders")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new habit
    Add {
        /// Habit name (case-sensitive)
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        name: String,
        /// Optional description
        description: Vec<String>,
    },
    /// Delete a habit and its logs
    Delete {
        name: String,
    },
    /// List all habits
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log habit completion (default: today)
    Log {
        name: String,
        /// Date as YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Record the day as explicitly not done
        #[arg(long)]
        missed: bool,
    },
    /// Show habit status and streaks (default: today)
    Status {
        /// Date as YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the daily reminder time
    SetAlert {
        /// Time as HH:MM (24-hour)
        #[arg(value_parser = parse_time)]
        time: NaiveTime,
        /// Keep running and deliver reminders in the foreground
        #[arg(long)]
        watch: bool,
    },
    /// Disable reminders
    DisableAlert,
    /// Show the current reminder settings
    Alert {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run in the foreground and deliver reminders
    Daemon,
    /// Send a test reminder
    TestNotification,
    /// Print the data file path
    Path,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("HABIT_TRACKER_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("habit_tracker=debug,habit_tracker_core=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Add { name, description } => commands::habit::add(&name, &description.join(" ")),
        Commands::Delete { name } => commands::habit::delete(&name),
        Commands::List { json } => commands::habit::list(json),
        Commands::Log { name, date, missed } => commands::habit::log(&name, date, missed),
        Commands::Status { date, json } => commands::habit::status(date, json),
        Commands::SetAlert { time, watch } => commands::alert::set(time, watch),
        Commands::DisableAlert => commands::alert::disable(),
        Commands::Alert { json } => commands::alert::show(json),
        Commands::Daemon => commands::alert::daemon(),
        Commands::TestNotification => commands::alert::test_notification(),
        Commands::Path => commands::path(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habit-tracker", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
