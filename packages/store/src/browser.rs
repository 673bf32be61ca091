//! # Browser storage surfaces
//!
//! [`BrowserStorage`] and [`DocumentCookies`] are the surface implementations used
//! on the **web platform**. Both are zero-cost handles that look up `window` on
//! every call, so they can be cloned freely into components and survive the
//! storage being cleared behind their back.
//!
//! | Type | Backing API |
//! |------|-------------|
//! | [`BrowserStorage`] with [`StorageScope::Session`] | `window.sessionStorage` (token, cached user, flash messages) |
//! | [`BrowserStorage`] with [`StorageScope::Local`] | `window.localStorage` (theme) |
//! | [`DocumentCookies`] | `document.cookie` |
//!
//! JavaScript exceptions (quota exceeded, storage disabled in private mode) are
//! turned into [`StorageError::Rejected`] with the exception's debug text.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

use crate::clock::now_millis;
use crate::cookie::{parse_cookie, CookieSpec};
use crate::error::StorageError;
use crate::surface::{CookieJar, KeyValueStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageScope {
    Session,
    Local,
}

impl StorageScope {
    fn name(self) -> &'static str {
        match self {
            StorageScope::Session => "sessionStorage",
            StorageScope::Local => "localStorage",
        }
    }
}

/// `window.sessionStorage` or `window.localStorage`.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    scope: StorageScope,
}

impl BrowserStorage {
    pub fn session() -> Self {
        Self {
            scope: StorageScope::Session,
        }
    }

    pub fn local() -> Self {
        Self {
            scope: StorageScope::Local,
        }
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable("window"))?;
        let storage = match self.scope {
            StorageScope::Session => window.session_storage(),
            StorageScope::Local => window.local_storage(),
        };
        storage
            .map_err(|e| rejected(self.scope.name(), e))?
            .ok_or(StorageError::Unavailable(self.scope.name()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| rejected(self.scope.name(), e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| rejected(self.scope.name(), e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| rejected(self.scope.name(), e))
    }
}

/// `document.cookie` for the current page.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookies;

impl DocumentCookies {
    pub fn new() -> Self {
        Self
    }

    fn document(&self) -> Result<HtmlDocument, StorageError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or(StorageError::Unavailable("document"))
    }
}

impl CookieJar for DocumentCookies {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let header = self
            .document()?
            .cookie()
            .map_err(|e| rejected("document.cookie", e))?;
        Ok(parse_cookie(&header, name))
    }

    fn set(&self, cookie: &CookieSpec) -> Result<(), StorageError> {
        self.document()?
            .set_cookie(&cookie.render(now_millis()))
            .map_err(|e| rejected("document.cookie", e))
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.set(&CookieSpec::expired(name))
    }
}

fn rejected(surface: &'static str, err: JsValue) -> StorageError {
    StorageError::Rejected {
        surface,
        message: format!("{err:?}"),
    }
}
