use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use habit_ledger::config::StorageBackend;
use habit_ledger::HabitCategory;

mod cli;

#[derive(Parser)]
#[command(name = "habit-ledger")]
#[command(about = "Habit Ledger - track daily habits, streaks, points and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.habit-ledger/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the ledger (overrides storage.data_dir)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file (with --data-dir, that directory is saved in it)
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,

        /// Storage backend: json or sqlite
        #[arg(long)]
        backend: Option<StorageBackend>,
    },

    /// List habits with today's status
    List,

    /// Create a habit
    Add {
        name: String,

        /// health, productivity, learning, social, creativity or wellness
        #[arg(long, default_value = "health")]
        category: HabitCategory,

        #[arg(long, default_value = "")]
        description: String,

        /// Display color (defaults to the category color)
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        /// Target weekdays, 0 = Sunday (e.g. --days 1,2,3,4,5)
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u8>>,
    },

    /// Edit a habit's name, category or display fields
    Edit {
        /// Habit id or unique id prefix
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<HabitCategory>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u8>>,
    },

    /// Delete a habit
    Delete {
        /// Habit id or unique id prefix
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark a habit done (or undo it) for a day
    Toggle {
        /// Habit id or unique id prefix
        id: String,

        /// Day to toggle, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show statistics for one habit
    Stats {
        /// Habit id or unique id prefix
        id: String,
    },

    /// Show the ledger-wide summary
    Overview,

    /// List unlocked and locked achievements
    Achievements,

    /// Switch between light and dark theme
    Theme,

    /// Show the user profile
    Profile,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let data_dir = cli.data_dir.as_deref();

    let open = || cli::open_ledger(config_path, data_dir);

    match cli.command.unwrap_or(Commands::List) {
        Commands::Init { force, backend } => {
            cli::init::init_command(config_path, data_dir, backend, force)
        }
        Commands::List => cli::habit::list_command(&open()?),
        Commands::Add {
            name,
            category,
            description,
            color,
            icon,
            days,
        } => cli::habit::add_command(
            &mut open()?,
            cli::habit::AddArgs {
                name,
                category,
                description,
                color,
                icon,
                days,
            },
        ),
        Commands::Edit {
            id,
            name,
            category,
            description,
            color,
            icon,
            days,
        } => cli::habit::edit_command(
            &mut open()?,
            &id,
            habit_ledger::HabitUpdate {
                name,
                description,
                category,
                color,
                icon,
                target_days: days,
            },
        ),
        Commands::Delete { id, yes } => cli::habit::delete_command(&mut open()?, &id, yes),
        Commands::Toggle { id, date } => {
            cli::habit::toggle_command(&mut open()?, &id, date.as_deref())
        }
        Commands::Stats { id } => cli::report::stats_command(&open()?, &id),
        Commands::Overview => cli::report::overview_command(&open()?),
        Commands::Achievements => cli::report::achievements_command(&open()?),
        Commands::Theme => cli::profile::theme_command(&mut open()?),
        Commands::Profile => cli::profile::profile_command(&open()?),
    }
}
