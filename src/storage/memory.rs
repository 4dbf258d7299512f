/// In-memory key-value store
///
/// Used for ephemeral sessions and as the substitute adapter in tests. An
/// optional byte quota makes writes fail the way a full browser storage area
/// would, so the engine's write-failure path can be exercised.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys plus values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Seed a raw value, bypassing the quota
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    /// Raw value currently stored under `key`
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn used_bytes_except(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_except(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
