/// Storage layer for persisting habit data
/// 
/// The engine only ever talks to a `KeyValueStore`: a string store with
/// get/set semantics holding two JSON blobs. `HabitStore` sits on top of it,
/// decoding the blobs at startup and writing them back after each mutation.

pub mod sqlite;
pub mod migrations;
pub mod memory;
pub mod store;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;
pub use store::*;

use thiserror::Error;

/// Key holding the JSON array of habits
pub const HABITS_KEY: &str = "habits";

/// Key holding the JSON object of completed habit ids per date
pub const COMPLETIONS_KEY: &str = "completedHabitsByDay";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),
    
    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),
    
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    
    #[error("Storage quota exceeded: writing '{key}' needs {needed} bytes, limit is {quota}")]
    QuotaExceeded { key: String, needed: usize, quota: usize },
    
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Persistence adapter interface
/// 
/// A plain key-value string store. Implementations decide where the bytes
/// live; the engine never assumes anything beyond get/set.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    
    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }
    
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
