//! Vetrina State - Observable, persisted application state.
//!
//! This crate holds the client-side state shared by the storefront UI: the
//! shopping cart and the logged-in user. Each lives in an observable
//! container whose every change is mirrored to a key/value storage area, and
//! which rehydrates from that area on startup.
//!
//! # Architecture
//!
//! The in-memory reactivity and the persistence are separate layers:
//!
//! - [`Store`] - a pure observable value container (subscribe / get / set /
//!   update), no I/O.
//! - [`StorageArea`] - the key/value persistence seam, with a durable
//!   file-backed implementation ([`FileStorage`]) and an ephemeral in-memory
//!   one ([`MemoryStorage`]).
//! - [`PersistedStore`] - a `Store` bound to one key in one area, writing
//!   through on every change.
//! - [`AppState`] - the aggregate handed to the application: the cart store
//!   (durable scope, key [`keys::CART`]) and the user store (session scope,
//!   key [`keys::USER`]).
//!
//! A store opened without a storage binding ("detached", the server-side
//! rendering path) holds its default value and never touches storage.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vetrina_state::{AppState, MemoryStorage, StorageHandles};
//!
//! let handles = StorageHandles::new(
//!     Arc::new(MemoryStorage::new()),
//!     Arc::new(MemoryStorage::new()),
//! );
//! let state = AppState::attached(&handles);
//!
//! state.cart.update(|cart| cart.set_line("sku-1", 2))?;
//! assert_eq!(state.cart.get().len(), 1);
//! # Ok::<(), vetrina_state::StateError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod persist;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{ConfigError, StateConfig};
pub use error::StateError;
pub use persist::{PersistedStore, StoredValue};
pub use state::{AppState, keys};
pub use storage::{FileStorage, MemoryStorage, StorageArea, StorageError, StorageHandles};
pub use store::{Store, SubscriberId};
