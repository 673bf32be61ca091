//! # Token store: one view over two storage surfaces
//!
//! The bearer token lives in two places at once:
//!
//! - the primary [`KeyValueStore`] (browser `sessionStorage`), read by the HTTP
//!   client before every request;
//! - the `token` cookie, read by the server-side route middleware before any
//!   client code runs.
//!
//! [`TokenStore`] hides that duplication. Reads check the primary surface first
//! and fall back to the cookie; when only the cookie has the token it is copied
//! back into the primary surface (sync-on-read). Writes go to both surfaces,
//! and clears are best-effort: a failure on one surface is logged and the other
//! surface is still cleared.
//!
//! The cached user profile sits next to the token (key `user`). A profile
//! without a token is not a session, so [`TokenStore::clear_token`] drops both.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::SessionConfig;
use crate::cookie::{CookieSpec, TOKEN_COOKIE};
use crate::error::StorageError;
use crate::surface::{CookieJar, KeyValueStore};

/// Primary-storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Primary-storage key for the cached profile JSON.
pub const USER_KEY: &str = "user";

/// Token and profile persistence shared by the HTTP client and session service.
#[derive(Clone)]
pub struct TokenStore {
    primary: Rc<dyn KeyValueStore>,
    cookies: Rc<dyn CookieJar>,
    config: SessionConfig,
}

impl TokenStore {
    pub fn new(
        primary: impl KeyValueStore + 'static,
        cookies: impl CookieJar + 'static,
        config: SessionConfig,
    ) -> Self {
        Self {
            primary: Rc::new(primary),
            cookies: Rc::new(cookies),
            config,
        }
    }

    /// The primary key/value surface, for callers that keep their own keys there.
    pub fn storage(&self) -> Rc<dyn KeyValueStore> {
        Rc::clone(&self.primary)
    }

    /// Resolve the bearer token, repairing the primary surface from the cookie.
    pub fn token(&self) -> Option<String> {
        let primary = match self.primary.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read token from primary storage");
                None
            }
        };
        if primary.is_some() {
            return primary;
        }

        let cookie = match self.cookies.get(TOKEN_COOKIE) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read token cookie");
                None
            }
        }?;

        if let Err(e) = self.primary.set(TOKEN_KEY, &cookie) {
            tracing::warn!(error = %e, "could not copy token cookie into primary storage");
        } else {
            tracing::debug!("token restored into primary storage from cookie");
        }
        Some(cookie)
    }

    /// Whether any surface holds a token. Performs the same repair as [`Self::token`].
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Write the token to both surfaces.
    ///
    /// Succeeds when at least one surface accepted it; individual failures are logged.
    pub fn save_token(&self, token: &str) -> Result<(), StorageError> {
        let primary = self.primary.set(TOKEN_KEY, token);
        if let Err(ref e) = primary {
            tracing::warn!(error = %e, "could not save token to primary storage");
        }

        let cookie = self
            .cookies
            .set(&CookieSpec::session_token(token, &self.config));
        if let Err(ref e) = cookie {
            tracing::warn!(error = %e, "could not save token cookie");
        }

        match (primary, cookie) {
            (Err(e), Err(_)) => Err(e),
            _ => Ok(()),
        }
    }

    /// Remove the token from both surfaces and the cached profile with it.
    /// Never fails.
    pub fn clear_token(&self) {
        if let Err(e) = self.primary.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "could not clear token from primary storage");
        }
        if let Err(e) = self.cookies.remove(TOKEN_COOKIE) {
            tracing::warn!(error = %e, "could not clear token cookie");
        }
        self.clear_user();
    }

    pub fn save_user<U: Serialize>(&self, user: &U) -> Result<(), StorageError> {
        let json = serde_json::to_string(user).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.primary.set(USER_KEY, &json)
    }

    /// The cached profile, if present and decodable. A corrupt entry is dropped.
    pub fn cached_user<U: DeserializeOwned>(&self) -> Option<U> {
        let raw = match self.primary.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read cached user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable cached user");
                self.clear_user();
                None
            }
        }
    }

    pub fn clear_user(&self) {
        if let Err(e) = self.primary.remove(USER_KEY) {
            tracing::warn!(error = %e, "could not clear cached user");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::memory::{MemoryCookies, MemoryStorage};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: i64,
        role: String,
    }

    fn fixture() -> (TokenStore, MemoryStorage, MemoryCookies) {
        let storage = MemoryStorage::new();
        let cookies = MemoryCookies::new();
        let tokens = TokenStore::new(storage.clone(), cookies.clone(), SessionConfig::default());
        (tokens, storage, cookies)
    }

    #[test]
    fn test_save_then_authenticated() {
        let (tokens, storage, cookies) = fixture();
        assert!(!tokens.is_authenticated());

        tokens.save_token("abc").unwrap();

        assert!(tokens.is_authenticated());
        assert_eq!(storage.peek(TOKEN_KEY), Some("abc".to_string()));
        let cookie = cookies.peek(TOKEN_COOKIE).unwrap();
        assert_eq!(cookie.value, "abc");
        assert!(cookie.secure);
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.expires_in_days, Some(7));
    }

    #[test]
    fn test_clear_then_not_authenticated() {
        let (tokens, storage, cookies) = fixture();
        tokens.save_token("abc").unwrap();

        tokens.clear_token();

        assert!(!tokens.is_authenticated());
        assert!(storage.peek(TOKEN_KEY).is_none());
        assert!(cookies.peek(TOKEN_COOKIE).is_none());
    }

    #[test]
    fn test_clear_survives_primary_failure() {
        let (tokens, storage, cookies) = fixture();
        tokens.save_token("abc").unwrap();

        storage.set_failing(true);
        tokens.clear_token();
        assert!(cookies.peek(TOKEN_COOKIE).is_none());
        // Unreadable primary storage is treated as empty.
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn test_clear_survives_cookie_failure() {
        let (tokens, storage, cookies) = fixture();
        tokens.save_token("abc").unwrap();

        cookies.set_failing(true);
        tokens.clear_token();
        assert!(storage.peek(TOKEN_KEY).is_none());
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn test_sync_on_read_repairs_primary() {
        let (tokens, storage, cookies) = fixture();
        cookies
            .set(&CookieSpec::session_token("from-cookie", &SessionConfig::default()))
            .unwrap();
        assert!(storage.peek(TOKEN_KEY).is_none());

        assert!(tokens.is_authenticated());
        assert_eq!(storage.peek(TOKEN_KEY), Some("from-cookie".to_string()));

        // Idempotent: a second read leaves the same state behind.
        assert!(tokens.is_authenticated());
        assert_eq!(storage.peek(TOKEN_KEY), Some("from-cookie".to_string()));
        assert_eq!(cookies.peek(TOKEN_COOKIE).unwrap().value, "from-cookie");
    }

    #[test]
    fn test_primary_wins_over_cookie() {
        let (tokens, storage, cookies) = fixture();
        storage.set(TOKEN_KEY, "primary").unwrap();
        cookies
            .set(&CookieSpec::session_token("cookie", &SessionConfig::default()))
            .unwrap();

        assert_eq!(tokens.token(), Some("primary".to_string()));
    }

    #[test]
    fn test_save_fails_only_when_both_surfaces_fail() {
        let (tokens, storage, cookies) = fixture();
        storage.set_failing(true);
        assert!(tokens.save_token("abc").is_ok());
        assert_eq!(cookies.peek(TOKEN_COOKIE).unwrap().value, "abc");

        cookies.set_failing(true);
        assert!(tokens.save_token("abc").is_err());
    }

    #[test]
    fn test_cached_user_cleared_with_token() {
        let (tokens, storage, _) = fixture();
        tokens.save_token("abc").unwrap();
        let profile = Profile {
            id: 7,
            role: "admin".to_string(),
        };
        tokens.save_user(&profile).unwrap();
        assert_eq!(tokens.cached_user::<Profile>(), Some(profile));

        tokens.clear_token();

        assert!(tokens.cached_user::<Profile>().is_none());
        assert!(storage.peek(USER_KEY).is_none());
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn test_corrupt_cached_user_is_dropped() {
        let (tokens, storage, _) = fixture();
        storage.set(USER_KEY, "{not json").unwrap();

        assert!(tokens.cached_user::<Profile>().is_none());
        assert!(storage.peek(USER_KEY).is_none());
    }
}
