//! Domain types for Vetrina.
//!
//! Both types are plain serde values: everything here must serialize to JSON
//! text and back without loss, because the state layer mirrors every value
//! into key/value storage.

pub mod cart;
pub mod user;

pub use cart::Cart;
pub use user::User;
