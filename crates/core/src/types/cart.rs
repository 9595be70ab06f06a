//! The shopping cart type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The shopping cart: a mapping from item identifier to per-item data.
///
/// The per-item shape is deliberately not constrained - a line may be a bare
/// quantity (`{"sku-1": 2}`) or a richer object with metadata. The cart only
/// guarantees that whatever is put in comes back out unchanged, which is what
/// the persistence layer needs.
///
/// The default cart is the empty mapping.
///
/// ## Examples
///
/// ```
/// use vetrina_core::Cart;
///
/// let mut cart = Cart::new();
/// assert!(cart.is_empty());
///
/// cart.set_line("sku-1", 2);
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.line("sku-1"), Some(&serde_json::json!(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<String, Value>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the line data for an item, if present.
    #[must_use]
    pub fn line(&self, item: &str) -> Option<&Value> {
        self.0.get(item)
    }

    /// Insert or replace the line for an item.
    pub fn set_line(&mut self, item: impl Into<String>, line: impl Into<Value>) {
        self.0.insert(item.into(), line.into());
    }

    /// Remove the line for an item, returning it if it was present.
    pub fn remove_line(&mut self, item: &str) -> Option<Value> {
        self.0.remove(item)
    }

    /// Iterate over `(item, line)` pairs in item order.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Cart {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
