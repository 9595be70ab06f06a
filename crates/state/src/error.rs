//! Unified error type for the state layer.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors surfaced by persisted-store operations.
///
/// Note that a mutating call that returns an error has already applied the
/// change in memory and notified subscribers; only the persistence
/// side effect failed.
#[derive(Debug, Error)]
pub enum StateError {
    /// The value could not be serialized to text.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage area rejected the read or write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
