//! Write-through persistence over [`Store`].
//!
//! A [`PersistedStore`] binds a [`Store`] to one key in one [`StorageArea`]:
//! the initial value is read from the entry at open time, and every change is
//! mirrored back. The [`StoredValue`] trait decides the entry form - in
//! particular, values that model "nothing" (a logged-out user) map to the
//! entry being removed rather than written as a null literal.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StateError;
use crate::storage::StorageArea;
use crate::store::{Store, SubscriberId};

/// A value that can live in a [`PersistedStore`].
///
/// The blanket [`Option`] implementation maps `None` to entry removal, which
/// is how logout clears the session entry instead of persisting a `null`.
pub trait StoredValue:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The serialized text for the storage entry, or `None` when the entry
    /// should be removed instead of written.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    fn to_entry(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self).map(Some)
    }
}

impl StoredValue for vetrina_core::Cart {}

impl<T> StoredValue for Option<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn to_entry(&self) -> Result<Option<String>, serde_json::Error> {
        match self {
            Some(value) => serde_json::to_string(value).map(Some),
            None => Ok(None),
        }
    }
}

/// A storage binding: one key in one area.
#[derive(Clone)]
struct Binding {
    area: Arc<dyn StorageArea>,
    key: &'static str,
}

/// An observable container whose value is mirrored to a storage entry.
///
/// Opened detached (no binding), it behaves exactly like a plain [`Store`]
/// over the default value and never touches storage.
pub struct PersistedStore<T: StoredValue> {
    store: Store<T>,
    binding: Option<Binding>,
}

impl<T: StoredValue> PersistedStore<T> {
    /// Open a store bound to `key` in `area`, rehydrating the initial value
    /// from the existing entry.
    ///
    /// A missing entry yields the default value. A malformed or unreadable
    /// entry also yields the default value, with a warning - bad persisted
    /// state must not take the application down at startup.
    #[must_use]
    pub fn attached(area: Arc<dyn StorageArea>, key: &'static str) -> Self {
        let value = Self::load(area.as_ref(), key);
        Self {
            store: Store::new(value),
            binding: Some(Binding { area, key }),
        }
    }

    /// Open a store with no storage binding: default value, no persistence.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            store: Store::new(T::default()),
            binding: None,
        }
    }

    fn load(area: &dyn StorageArea, key: &'static str) -> T {
        let text = match area.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return T::default(),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored entry unreadable, using default");
                return T::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            tracing::warn!(key, error = %err, "stored entry malformed, using default");
            T::default()
        })
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.store.get()
    }

    /// Replace the value, notify subscribers, then mirror the change to
    /// storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails. The
    /// in-memory value has already changed and subscribers have been
    /// notified.
    pub fn set(&self, value: T) -> Result<(), StateError> {
        self.store.set(value);
        self.flush()
    }

    /// Mutate the value in place, notify subscribers, then mirror the change
    /// to storage.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn update(&self, f: impl FnOnce(&mut T)) -> Result<(), StateError> {
        self.store.update(f);
        self.flush()
    }

    /// Register a subscriber; see [`Store::subscribe`].
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        self.store.subscribe(callback)
    }

    /// Remove a subscriber; see [`Store::unsubscribe`].
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.store.unsubscribe(id)
    }

    fn flush(&self) -> Result<(), StateError> {
        let Some(binding) = &self.binding else {
            return Ok(());
        };
        match self.store.get().to_entry()? {
            Some(text) => {
                binding.area.set(binding.key, &text)?;
                tracing::debug!(key = binding.key, "persisted entry");
            }
            None => {
                binding.area.remove(binding.key)?;
                tracing::debug!(key = binding.key, "removed entry");
            }
        }
        Ok(())
    }
}

impl<T: StoredValue + std::fmt::Debug> std::fmt::Debug for PersistedStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedStore")
            .field("value", &self.get())
            .field("attached", &self.binding.is_some())
            .finish()
    }
}
