//! # Storage surfaces
//!
//! The client persists session data in two places that behave differently:
//!
//! | Trait | Browser backing | Visible to |
//! |-------|-----------------|------------|
//! | [`KeyValueStore`] | `sessionStorage` / `localStorage` | client code only |
//! | [`CookieJar`] | `document.cookie` | client code and the server-side route middleware |
//!
//! Both are synchronous: browser storage calls complete atomically on the
//! calling tab's thread, so no locking is needed around them. Implementations
//! live in [`crate::memory`] (tests, server-side rendering) and `crate::browser`
//! (`wasm32` + `web` feature).

use crate::cookie::CookieSpec;
use crate::error::StorageError;

/// A string key/value area such as `window.sessionStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Cookie access for the current document.
pub trait CookieJar {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, cookie: &CookieSpec) -> Result<(), StorageError>;
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}
