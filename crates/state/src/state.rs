//! The application state aggregate.
//!
//! One `AppState` is built at startup and passed to whatever needs it; there
//! is no global singleton. Components observe the stores, mutate them, and
//! persistence happens behind the scenes.

use std::sync::Arc;

use vetrina_core::{Cart, User};

use crate::config::StateConfig;
use crate::error::StateError;
use crate::persist::PersistedStore;
use crate::storage::{FileStorage, MemoryStorage, StorageHandles};

/// Storage keys owned by the state layer.
pub mod keys {
    /// Durable entry holding the serialized cart.
    pub const CART: &str = "carrello";

    /// Session entry holding the serialized logged-in user.
    pub const USER: &str = "utente";
}

/// The shared application state: cart and logged-in user.
///
/// The cart lives in the durable scope (it should survive a restart); the
/// user lives in the session scope (logging out, or the session ending,
/// clears it).
#[derive(Debug)]
pub struct AppState {
    /// The shopping cart, persisted under [`keys::CART`].
    pub cart: PersistedStore<Cart>,
    /// The logged-in user, persisted under [`keys::USER`]. `None` means no
    /// session.
    pub user: PersistedStore<Option<User>>,
}

impl AppState {
    /// Build the state over the given storage handles, rehydrating both
    /// stores from their entries.
    #[must_use]
    pub fn attached(storage: &StorageHandles) -> Self {
        Self {
            cart: PersistedStore::attached(Arc::clone(&storage.local), keys::CART),
            user: PersistedStore::attached(Arc::clone(&storage.session), keys::USER),
        }
    }

    /// Build the state with no storage at all: default values, no
    /// persistence. The path for contexts where storage is unavailable,
    /// e.g. server-side rendering.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            cart: PersistedStore::detached(),
            user: PersistedStore::detached(),
        }
    }

    /// Build the state from configuration: a [`FileStorage`] durable scope
    /// under the configured data directory and a fresh [`MemoryStorage`]
    /// session scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: &StateConfig) -> Result<Self, StateError> {
        std::fs::create_dir_all(&config.data_dir).map_err(crate::storage::StorageError::from)?;
        let handles = StorageHandles::new(
            Arc::new(FileStorage::new(&config.data_dir)),
            Arc::new(MemoryStorage::new()),
        );
        Ok(Self::attached(&handles))
    }

    /// Build the state from the process environment; see
    /// [`StateConfig::from_env`] for the variables consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails or the data directory
    /// cannot be created.
    pub fn from_env() -> Result<Self, StateError> {
        let config = StateConfig::from_env()?;
        Self::from_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_state_has_defaults() {
        let state = AppState::detached();
        assert!(state.cart.get().is_empty());
        assert_eq!(state.user.get(), None);
    }

    #[test]
    fn test_from_config_persists_under_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StateConfig {
            data_dir: dir.path().join("state"),
        };

        let state = AppState::from_config(&config).expect("buildable");
        assert!(config.data_dir.is_dir());

        state
            .cart
            .update(|cart| cart.set_line("sku-1", 2))
            .expect("persisted");

        // The durable scope is the configured directory: a second state over
        // the same config rehydrates the cart. The session scope is fresh.
        let rebuilt = AppState::from_config(&config).expect("buildable");
        assert_eq!(rebuilt.cart.get().line("sku-1"), Some(&serde_json::json!(2)));
        assert_eq!(rebuilt.user.get(), None);
    }

    #[test]
    fn test_from_config_surfaces_directory_creation_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").expect("writable");

        let config = StateConfig {
            data_dir: blocker.join("state"),
        };
        let err = AppState::from_config(&config).expect_err("creation must fail");
        assert!(matches!(err, StateError::Storage(_)));
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_from_env_reports_config_errors() {
        use std::sync::PoisonError;

        let _guard = crate::test_env::LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // SAFETY: single-threaded within the lock; no other thread reads the
        // environment while it is held.
        unsafe {
            std::env::set_var("VETRINA_DATA_DIR", "");
        }
        let err = AppState::from_env().expect_err("empty data dir must be rejected");
        unsafe {
            std::env::remove_var("VETRINA_DATA_DIR");
        }
        assert!(matches!(err, StateError::Config(_)));
    }

    #[test]
    fn test_attached_state_rehydrates_both_scopes() {
        let handles = StorageHandles::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(MemoryStorage::new()),
        );
        handles
            .local
            .set(keys::CART, r#"{"sku-1":2}"#)
            .expect("writable");
        handles
            .session
            .set(keys::USER, r#"{"id":42,"name":"Ana"}"#)
            .expect("writable");

        let state = AppState::attached(&handles);
        assert_eq!(state.cart.get().line("sku-1"), Some(&serde_json::json!(2)));
        assert_eq!(state.user.get(), Some(User::new(42, "Ana")));
    }
}
