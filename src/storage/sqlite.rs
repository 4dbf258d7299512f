/// SQLite implementation of the key-value persistence adapter
///
/// Every key lives in one row of the `kv_entries` table. Values are opaque
/// strings; decoding them is the job of `HabitStore`.

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params};
use chrono::Utc;

use crate::storage::{StorageError, KeyValueStore, migrations};

/// SQLite-based key-value store
///
/// Holds a connection to the database file and implements the get/set
/// contract of `KeyValueStore`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at `db_path`
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a store that lives only as long as this value
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }
}
