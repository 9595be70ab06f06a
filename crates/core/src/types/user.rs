//! The logged-in user's session record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A logged-in user.
///
/// Minimal identity fields plus a flattened bag of whatever else the backend
/// attached to the session record, so that profile attributes this crate does
/// not know about survive a persist/rehydrate cycle unchanged.
///
/// "No session" is represented as `Option<User>::None` by the state layer,
/// not as a field on this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's backend id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Any further session/profile attributes, carried opaquely.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, Value>,
}

impl User {
    /// Create a user with no extra attributes.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trips_bare_record() {
        let user = User::new(42, "Ana");
        let text = serde_json::to_string(&user).expect("serializable");
        let back: User = serde_json::from_str(&text).expect("parseable");
        assert_eq!(back, user);
    }

    #[test]
    fn test_parses_backend_record() {
        let user: User = serde_json::from_str(r#"{"id":42,"name":"Ana"}"#).expect("parseable");
        assert_eq!(user, User::new(42, "Ana"));
        assert!(user.attrs.is_empty());
    }

    #[test]
    fn test_preserves_unknown_attributes() {
        let text = r#"{"id":7,"name":"Luca","email":"luca@example.com","vip":true}"#;
        let user: User = serde_json::from_str(text).expect("parseable");
        assert_eq!(user.attrs.get("email"), Some(&json!("luca@example.com")));
        assert_eq!(user.attrs.get("vip"), Some(&json!(true)));

        let back = serde_json::to_string(&user).expect("serializable");
        let reparsed: User = serde_json::from_str(&back).expect("parseable");
        assert_eq!(reparsed, user);
    }
}
