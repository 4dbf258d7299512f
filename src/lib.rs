/// Public library interface for the daily habit tracker
///
/// This module exports the habit engine (store + operations), the
/// persistence adapters, and the interactive shell that hosts them.

use thiserror::Error;

// Internal modules
mod config;
mod domain;
mod operations;
mod routing;
mod shell;
mod storage;

// Re-export public modules and types
pub use config::{AppConfig, CONFIG_FILE_NAME};
pub use domain::*;
pub use operations::{
    DaySummary, DayView, HabitOperations, HabitRow, Notices, TransientMessage, ADDED_MESSAGE,
    DELETED_MESSAGE, RESUMED_MESSAGE, STOPPED_MESSAGE, UPDATED_MESSAGE,
};
pub use routing::{date_from_path, day_path, parse_date, resolve_cursor, today, DAY_ROUTE_PREFIX};
pub use shell::{Command, CommandError, Reply, Session};
pub use storage::{
    HabitStore, KeyValueStore, MemoryStore, SqliteStore, StorageError, COMPLETIONS_KEY,
    HABITS_KEY,
};

/// Errors that can stop the tracker
///
/// Engine operations never fail this way; these come from opening storage
/// and from the terminal streams.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The habit tracker application: engine plus interactive shell
pub struct HabitTracker {
    session: Session<Box<dyn KeyValueStore>>,
}

impl HabitTracker {
    /// Build the tracker over `backend`
    ///
    /// `start` is either a `YYYY-MM-DD` date or a route path such as
    /// `/day/2024-01-01`; anything else (or nothing) starts on today.
    pub fn open(backend: Box<dyn KeyValueStore>, start: Option<&str>, config: &AppConfig) -> Self {
        let today = routing::today();
        let selected_date = match start {
            Some(path) if path.starts_with('/') => routing::date_from_path(path, today),
            other => routing::resolve_cursor(other, today, config.min_date),
        };

        tracing::info!("Opening habit tracker on {}", selected_date);

        let store = HabitStore::load(backend);
        tracing::info!("Found {} existing habits", store.habits().len());

        let operations = HabitOperations::new(store, selected_date, config);
        Self {
            session: Session::new(operations, config),
        }
    }

    /// Run the shell over stdin/stdout until input closes or `quit`
    pub async fn run(mut self) -> Result<(), TrackerError> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        self.session.run(stdin, stdout).await?;
        Ok(())
    }

    /// Get a reference to the engine (useful for testing)
    pub fn operations(&self) -> &HabitOperations<Box<dyn KeyValueStore>> {
        self.session.operations()
    }
}
