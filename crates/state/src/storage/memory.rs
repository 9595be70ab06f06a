//! In-memory storage area.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::{StorageArea, StorageError};

/// An in-memory [`StorageArea`].
///
/// The session scope: entries live as long as this instance and are gone when
/// it is dropped. Two instances never share entries. Also used as the test
/// double for the durable scope.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the area holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl StorageArea for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
