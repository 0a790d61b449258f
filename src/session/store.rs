//! Persisted session storage.
//!
//! A session is persisted as two key-value entries, [`USER_KEY`] and
//! [`SESSION_KEY`], written and cleared together. A record with only one of
//! the two keys is treated as absent and wiped on load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::Session;
use crate::error::{ClientError, Result};

/// Key holding the username.
pub const USER_KEY: &str = "currentUser";
/// Key holding the session id.
pub const SESSION_KEY: &str = "sessionId";

/// Where the session survives restarts.
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if a complete one exists.
    fn load(&self) -> Result<Option<Session>>;

    /// Persist `session`, replacing whatever was stored.
    fn save(&self, session: &Session) -> Result<()>;

    /// Erase both entries. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;
}

fn session_from_map(map: &HashMap<String, String>) -> Option<Session> {
    Session::from_parts(map.get(USER_KEY).cloned(), map.get(SESSION_KEY).cloned())
}

fn session_to_map(session: &Session) -> HashMap<String, String> {
    HashMap::from([
        (USER_KEY.to_string(), session.username().to_string()),
        (SESSION_KEY.to_string(), session.session_id().to_string()),
    ])
}

/// In-memory store, for tests and throwaway clients.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `session`.
    pub fn with_session(session: &Session) -> Self {
        Self {
            inner: Mutex::new(session_to_map(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Write a single raw entry.
    pub fn set_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    /// Read a single raw entry.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let mut map = self.lock();
        let session = session_from_map(&map);
        if session.is_none() && !map.is_empty() {
            tracing::warn!("dropping incomplete persisted session");
            map.remove(USER_KEY);
            map.remove(SESSION_KEY);
        }
        Ok(session)
    }

    fn save(&self, session: &Session) -> Result<()> {
        self.lock().extend(session_to_map(session));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.lock();
        map.remove(USER_KEY);
        map.remove(SESSION_KEY);
        Ok(())
    }
}

/// JSON file store: `{"currentUser": "...", "sessionId": "..."}`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Storage(format!("Read error: {}", e)))?;

        let map: HashMap<String, String> = match serde_json::from_str(&json) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("discarding unreadable session file {:?}: {}", self.path, e);
                self.clear()?;
                return Ok(None);
            }
        };

        let session = session_from_map(&map);
        if session.is_none() {
            tracing::warn!("dropping incomplete persisted session");
            self.clear()?;
        }
        Ok(session)
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("Create dir error: {}", e)))?;
        }
        let json = serde_json::to_string(&session_to_map(session))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ClientError::Storage(format!("Write error: {}", e)))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!("Remove error: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);

        let session = Session::new("alice", "sid-1");
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));
        assert_eq!(store.get_raw(USER_KEY).as_deref(), Some("alice"));
        assert_eq!(store.get_raw(SESSION_KEY).as_deref(), Some("sid-1"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_half_record_is_wiped() {
        let store = MemorySessionStore::new();
        store.set_raw(USER_KEY, "alice");
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.get_raw(USER_KEY), None);
        assert_eq!(store.get_raw(SESSION_KEY), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().unwrap(), None);

        let session = Session::new("bob", "sid-2");
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        let raw: HashMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw.get("currentUser").map(String::as_str), Some("bob"));
        assert_eq!(raw.get("sessionId").map(String::as_str), Some("sid-2"));

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_incomplete_or_corrupt_is_wiped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        std::fs::write(&path, r#"{"sessionId":"orphan"}"#).unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }
}
