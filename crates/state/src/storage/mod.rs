//! Key/value storage areas backing the persisted stores.
//!
//! A [`StorageArea`] is the persistence seam: text values under string keys,
//! nothing else. Two implementations are provided:
//!
//! - [`FileStorage`] - durable scope, one file per key under a root
//!   directory, survives process restarts.
//! - [`MemoryStorage`] - session scope, lives as long as the process (also
//!   the test double).
//!
//! [`StorageHandles`] pairs the two scopes for injection into
//! [`AppState`](crate::AppState).

use std::sync::Arc;

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage area.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used with this backend.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// A synchronous key/value storage area holding text values.
///
/// Keys are flat strings; values are UTF-8 text (the persisted stores write
/// JSON). Removing a missing key is a no-op.
pub trait StorageArea: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid for this backend or the write
    /// fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the entry under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails for a reason other than the key
    /// being absent.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The two storage scopes injected into the application state.
#[derive(Clone)]
pub struct StorageHandles {
    /// Durable scope: survives restarts. Backs the cart.
    pub local: Arc<dyn StorageArea>,
    /// Session scope: cleared when the process ends. Backs the user.
    pub session: Arc<dyn StorageArea>,
}

impl StorageHandles {
    /// Pair a durable and a session area.
    #[must_use]
    pub fn new(local: Arc<dyn StorageArea>, session: Arc<dyn StorageArea>) -> Self {
        Self { local, session }
    }
}

impl std::fmt::Debug for StorageHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageHandles").finish_non_exhaustive()
    }
}
