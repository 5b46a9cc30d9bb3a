use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendwatch::cli::{
    handle_import_command, handle_reset_command, handle_stats_command, handle_user_command,
    handle_warnings_command, StatsArgs,
};
use spendwatch::config::{paths::SpendPaths, settings::Settings};
use spendwatch::services::ImportService;
use spendwatch::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendwatch",
    author = "Kaylee Beyene",
    version,
    about = "Per-user spending statistics with overspend warnings",
    long_about = "SpendWatch imports financial transactions and reports how much a \
                  user spent over a time range, by category and per day. Every query \
                  also checks daily and rolling weekly spending limits."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show spending statistics for a user and time range
    Stats(StatsArgs),

    /// Show a user
    User {
        /// User ID
        id: i64,
    },

    /// Import transactions from a JSON or CSV file
    Import {
        /// Path to the file (.csv for CSV, anything else is read as JSON)
        file: PathBuf,
    },

    /// List recorded limit warnings
    Warnings {
        /// Number of most recent warnings to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete all transactions and users
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

/// Import the configured seed file into an empty store
fn seed_store(storage: &Storage, settings: &Settings, paths: &SpendPaths) -> Result<()> {
    let Some(seed) = &settings.seed_file else {
        return Ok(());
    };

    let seed = if seed.is_relative() {
        paths.base_dir().join(seed)
    } else {
        seed.clone()
    };

    if let Some(result) = ImportService::new(storage).seed_if_empty(&seed)? {
        debug!(imported = result.imported, "seeded store");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = SpendPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Stats(args)) => {
            seed_store(&storage, &settings, &paths)?;
            handle_stats_command(&storage, &settings, args)?;
        }
        Some(Commands::User { id }) => {
            seed_store(&storage, &settings, &paths)?;
            handle_user_command(&storage, id)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &file)?;
        }
        Some(Commands::Warnings { limit }) => {
            handle_warnings_command(&paths, limit)?;
        }
        Some(Commands::Reset { yes }) => {
            handle_reset_command(&storage, yes)?;
        }
        Some(Commands::Init) => {
            println!("Initializing SpendWatch at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'spendwatch import <FILE>' to load transactions.");
        }
        Some(Commands::Config) => {
            println!("SpendWatch Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Warnings log:     {}", paths.warnings_log().display());
            println!();
            println!("Settings:");
            println!("  Daily limit:    {}", settings.limits.daily_limit);
            println!("  Weekly limit:   {}", settings.limits.weekly_limit);
            println!("  Log warnings:   {}", settings.warnings.log);
            println!("  File warnings:  {}", settings.warnings.file);
            println!("  Default format: {}", settings.default_format);
            match &settings.seed_file {
                Some(seed) => println!("  Seed file:      {}", seed.display()),
                None => println!("  Seed file:      (none)"),
            }
        }
        None => {
            println!("SpendWatch - spending statistics and overspend warnings");
            println!();
            println!("Run 'spendwatch --help' for usage information.");
        }
    }

    Ok(())
}
