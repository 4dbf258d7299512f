/// Main entry point for the daily habit tracker
///
/// This file sets up logging, parses command line arguments, loads the
/// configuration and starts the interactive shell on stdin/stdout.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use daily_habits::{AppConfig, HabitTracker, KeyValueStore, MemoryStore, SqliteStore};

/// Get the default data directory with robust fallback strategy
fn get_default_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("daily_habits");
            p
        }),
        // 2. User's home directory
        dirs::home_dir().map(|mut p| {
            p.push(".daily_habits");
            p
        }),
        // 3. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".daily_habits");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.clone());
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("daily_habits");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for data: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the daily habit tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses habits.db in the data directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Path to a JSON config file
    /// If not provided, uses config.json in the data directory when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Day to open: YYYY-MM-DD or a route like /day/2024-01-01 (default: today)
    #[arg(long)]
    date: Option<String>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    in_memory: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("daily_habits={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for the shell
        .init();

    info!("Starting daily habit tracker");

    let data_dir = get_default_data_dir()?;
    let config_path = args
        .config
        .unwrap_or_else(|| AppConfig::default_path(&data_dir));
    let config = AppConfig::load(&config_path)?;
    info!("Loaded configuration from {}", config_path.display());

    let backend: Box<dyn KeyValueStore> = if args.in_memory {
        info!("Using in-memory storage");
        Box::new(MemoryStore::new())
    } else {
        let db_path = match args.database {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                path
            }
            None => data_dir.join("habits.db"),
        };
        info!("Using database at: {}", db_path.display());
        Box::new(SqliteStore::new(&db_path)?)
    };

    let tracker = HabitTracker::open(backend, args.date.as_deref(), &config);
    tracker.run().await?;

    info!("Daily habit tracker shutdown complete");
    Ok(())
}
