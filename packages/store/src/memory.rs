use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cookie::CookieSpec;
use crate::error::StorageError;
use crate::surface::{CookieJar, KeyValueStore};

/// In-memory key/value surface for tests and server-side rendering.
///
/// Clones share the same map, like two handles on one `sessionStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail until switched back off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw view of a key, bypassing the failure switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected {
                surface: "memory storage",
                message: "simulated failure".to_string(),
            });
        }
        self.entries.lock().map_err(|e| StorageError::Rejected {
            surface: "memory storage",
            message: e.to_string(),
        })
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// In-memory cookie jar. Keeps the last rendered attributes so tests can
/// inspect what would have been written to `document.cookie`.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookies {
    cookies: Arc<Mutex<HashMap<String, CookieSpec>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The stored cookie with all its attributes, bypassing the failure switch.
    pub fn peek(&self, name: &str) -> Option<CookieSpec> {
        self.cookies
            .lock()
            .ok()
            .and_then(|cookies| cookies.get(name).cloned())
    }

    fn cookies(&self) -> Result<MutexGuard<'_, HashMap<String, CookieSpec>>, StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected {
                surface: "memory cookies",
                message: "simulated failure".to_string(),
            });
        }
        self.cookies.lock().map_err(|e| StorageError::Rejected {
            surface: "memory cookies",
            message: e.to_string(),
        })
    }
}

impl CookieJar for MemoryCookies {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .cookies()?
            .get(name)
            .map(|cookie| cookie.value.clone())
            .filter(|value| !value.is_empty()))
    }

    fn set(&self, cookie: &CookieSpec) -> Result<(), StorageError> {
        let mut cookies = self.cookies()?;
        if cookie.expires_in_days == Some(0) {
            cookies.remove(&cookie.name);
        } else {
            cookies.insert(cookie.name.clone(), cookie.clone());
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.set(&CookieSpec::expired(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("token", "abc").unwrap();
        assert_eq!(other.get("token").unwrap(), Some("abc".to_string()));

        other.remove("token").unwrap();
        assert!(storage.get("token").unwrap().is_none());
    }

    #[test]
    fn test_failing_storage_rejects_but_keeps_data() {
        let storage = MemoryStorage::new();
        storage.set("token", "abc").unwrap();

        storage.set_failing(true);
        assert!(storage.get("token").is_err());
        assert!(storage.remove("token").is_err());
        assert_eq!(storage.peek("token"), Some("abc".to_string()));

        storage.set_failing(false);
        assert_eq!(storage.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_expired_cookie_write_evicts() {
        let cookies = MemoryCookies::new();
        cookies
            .set(&CookieSpec::session_token("abc", &Default::default()))
            .unwrap();
        assert_eq!(cookies.get("token").unwrap(), Some("abc".to_string()));

        cookies.remove("token").unwrap();
        assert!(cookies.get("token").unwrap().is_none());
        assert!(cookies.peek("token").is_none());
    }
}
