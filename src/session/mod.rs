//! # Session Module
//!
//! Per-request session capability handed to controllers and handlers.
//!
//! A [`Session`] is built fresh for every request (for the controller's
//! constructor and for every session-typed handler parameter). It holds a
//! shared handle to the host's [`SessionStore`] and never copies or caches
//! the attributes itself.

mod store;

pub use store::{MemorySessionStore, SessionManager, SessionStore, DEFAULT_SESSION_CAPACITY};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Session capability over the current request's store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn id(&self) -> String {
        self.store.id()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    /// Read an attribute and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        self.store
            .get(key)
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Serialize `value` and store it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        self.store.set(key, serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.store.remove(key)
    }

    /// Whether `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.store.get(key).is_some()
    }

    pub fn invalidate(&self) {
        self.store.invalidate();
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.store.is_valid()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("id", &self.store.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Cart {
        items: Vec<String>,
    }

    #[test]
    fn test_wrappers_share_one_store() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let a = Session::new(Arc::clone(&store));
        let b = Session::new(store);
        a.set("user", "alice").unwrap();
        assert_eq!(b.get_as::<String>("user").unwrap(), Some("alice".to_string()));
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_typed_round_trip() {
        let session = Session::new(Arc::new(MemorySessionStore::new()));
        let cart = Cart {
            items: vec!["book".into()],
        };
        session.set("cart", &cart).unwrap();
        assert_eq!(session.get_as::<Cart>("cart").unwrap(), Some(cart));
        assert!(session.contains("cart"));
        session.remove("cart");
        assert!(!session.contains("cart"));
    }
}
