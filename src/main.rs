use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::analytics::AnalyticsView;

#[derive(Parser)]
#[command(name = "habit-quest")]
#[command(about = "Habit Quest - track daily habits, keep streaks alive, and level up")]
#[command(version)]
struct Cli {
    /// Path to the habit data file (defaults to the configured data file)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.habit-quest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, today's progress and every habit
    Status,

    /// List habits with their ids
    List,

    /// Add a new habit
    Add {
        /// Habit name
        name: String,

        /// Category the habit belongs to
        #[arg(short = 'C', long)]
        category: String,
    },

    /// Delete a habit by id
    Delete {
        /// Habit id (see `list`)
        id: String,
    },

    /// Mark a habit complete (today unless --date is given)
    Done {
        /// Habit id (see `list`)
        id: String,

        /// Day to mark, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Unmark a habit (today unless --date is given)
    Undo {
        /// Habit id (see `list`)
        id: String,

        /// Day to unmark, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show streak achievements and milestones
    Achievements,

    /// Show analytics
    Analytics {
        #[arg(value_enum, default_value_t = AnalyticsView::Streaks)]
        view: AnalyticsView,
    },

    /// Export all data as indented JSON
    Export {
        /// Destination file
        dest: PathBuf,
    },

    /// Delete all habits, achievements and progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Initialize the config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // The only clock read: everything below takes the date explicitly
    let today = Local::now().date_naive();

    let config_path = cli.config.as_deref();
    let data_path = cli.data.as_deref();
    let open = || cli::Session::open(config_path, data_path, today);

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cli::status::status_command(&open()?),
        Commands::List => cli::habit::list_command(&open()?),
        Commands::Add { name, category } => {
            cli::habit::add_command(&mut open()?, &name, &category)?
        }
        Commands::Delete { id } => cli::habit::delete_command(&mut open()?, &id)?,
        Commands::Done { id, date } => {
            cli::track::track_command(&mut open()?, &id, date.unwrap_or(today), true)?
        }
        Commands::Undo { id, date } => {
            cli::track::track_command(&mut open()?, &id, date.unwrap_or(today), false)?
        }
        Commands::Achievements => cli::achievements::achievements_command(&open()?),
        Commands::Analytics { view } => cli::analytics::analytics_command(&open()?, view),
        Commands::Export { dest } => cli::data::export_command(&open()?, &dest)?,
        Commands::Reset { yes } => cli::data::reset_command(&mut open()?, yes)?,
        Commands::Init { force } => cli::init::init_command(config_path, force)?,
    }

    Ok(())
}
