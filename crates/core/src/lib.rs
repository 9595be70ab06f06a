//! Vetrina Core - Shared domain types.
//!
//! This crate provides the value types held by the observable state layer:
//! - [`Cart`] - The shopping cart, an open-ended mapping from item id to line data
//! - [`User`] - The logged-in user's session record
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! subscriptions. This keeps it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
