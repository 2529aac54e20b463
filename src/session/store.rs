use crate::ids::SessionId;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Attribute store behind a client session.
///
/// The host owns the store; handlers only ever see it through a
/// [`super::Session`] wrapper.
pub trait SessionStore: Send + Sync {
    fn id(&self) -> String;
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn remove(&self, key: &str) -> Option<Value>;
    /// Drop every attribute and mark the session invalid
    fn invalidate(&self);
    fn is_valid(&self) -> bool;
}

/// In-process session store.
#[derive(Debug)]
pub struct MemorySessionStore {
    id: SessionId,
    attributes: DashMap<String, Value>,
    valid: AtomicBool,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    #[must_use]
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            attributes: DashMap::new(),
            valid: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.id
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.attributes.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: Value) {
        self.attributes.insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) -> Option<Value> {
        self.attributes.remove(key).map(|(_, v)| v)
    }

    fn invalidate(&self) {
        self.attributes.clear();
        self.valid.store(false, Ordering::Release);
    }

    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }
}

/// Default number of live sessions kept by a [`SessionManager`]
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

/// Sessions known to the host, keyed by cookie id.
///
/// Bounded: once `capacity` sessions are live, creating another evicts the
/// least recently used one.
#[derive(Debug)]
pub struct SessionManager {
    // LruCache::get() needs &mut to update recency
    sessions: Mutex<LruCache<SessionId, Arc<MemorySessionStore>>>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl SessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager holding at most `capacity` sessions (minimum 1)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, LruCache<SessionId, Arc<MemorySessionStore>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the live session for `cookie`, creating a new one when the cookie
    /// is missing, malformed, unknown or points at an invalidated session.
    ///
    /// The flag is `true` when a new session was created.
    pub fn get_or_create(&self, cookie: Option<&str>) -> (Arc<MemorySessionStore>, bool) {
        let mut sessions = self.sessions();

        if let Some(id) = cookie.and_then(SessionId::from_cookie) {
            let live = sessions.get(&id).filter(|s| s.is_valid()).map(Arc::clone);
            if let Some(existing) = live {
                return (existing, false);
            }
            sessions.pop(&id);
        }

        let store = Arc::new(MemorySessionStore::new());
        debug!(session_id = %store.session_id(), "Session created");
        if let Some((evicted, _)) = sessions.push(store.session_id(), Arc::clone(&store)) {
            debug!(session_id = %evicted, "Session evicted");
        }
        (store, true)
    }

    /// Maximum number of live sessions
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sessions().cap().get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_attributes() {
        let store = MemorySessionStore::new();
        store.set("user", json!("alice"));
        assert_eq!(store.get("user"), Some(json!("alice")));
        assert_eq!(store.remove("user"), Some(json!("alice")));
        assert_eq!(store.get("user"), None);
    }

    #[test]
    fn test_invalidate_clears() {
        let store = MemorySessionStore::new();
        store.set("k", json!(1));
        store.invalidate();
        assert!(!store.is_valid());
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_manager_reuses_known_cookie() {
        let manager = SessionManager::new();
        let (first, created) = manager.get_or_create(None);
        assert!(created);
        let cookie = first.id();
        let (second, created) = manager.get_or_create(Some(&cookie));
        assert!(!created);
        assert_eq!(second.id(), cookie);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_manager_replaces_invalidated_session() {
        let manager = SessionManager::new();
        let (first, _) = manager.get_or_create(None);
        first.invalidate();
        let (second, created) = manager.get_or_create(Some(&first.id()));
        assert!(created);
        assert_ne!(second.id(), first.id());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_manager_evicts_least_recent_at_capacity() {
        let manager = SessionManager::with_capacity(2);
        let (first, _) = manager.get_or_create(None);
        let (second, _) = manager.get_or_create(None);

        // touch the first so the second becomes least recent
        let (_, created) = manager.get_or_create(Some(&first.id()));
        assert!(!created);

        let (_third, created) = manager.get_or_create(None);
        assert!(created);
        assert_eq!(manager.len(), 2);

        let (_, created) = manager.get_or_create(Some(&first.id()));
        assert!(!created);
        let (_, created) = manager.get_or_create(Some(&second.id()));
        assert!(created);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_manager_capacity_floor() {
        assert_eq!(SessionManager::with_capacity(0).capacity(), 1);
        assert_eq!(SessionManager::new().capacity(), DEFAULT_SESSION_CAPACITY);
    }
}
