//! # Client configuration: `notes-client.toml`
//!
//! Settings that shape how the client talks to the notes API and keeps its
//! session. The API base URL is baked in at build time from the `NOTES_API_URL`
//! environment variable and can be overridden by the optional TOML file that the
//! fullstack server reads at startup.
//!
//! ```toml
//! [api]
//! base_url = "https://api-notes.vinod.digital"
//!
//! [session]
//! cookie_days = 7        # clamped to 1..=7
//! secure_cookie = true   # adds `secure; samesite=strict`
//!
//! [guard]
//! refresh_throttle_ms = 2000
//! role_recheck_ms = 5000
//! ```
//!
//! Every section derives `Default`, so a missing or empty file is equivalent to
//! the defaults above.

use serde::{Deserialize, Serialize};

/// API base URL used when the build does not set `NOTES_API_URL`.
pub const DEFAULT_API_URL: &str = "https://api-notes.vinod.digital";

const MIN_COOKIE_DAYS: u32 = 1;
const MAX_COOKIE_DAYS: u32 = 7;

/// Top-level configuration stored in `notes-client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub guard: GuardConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API, without the `/api/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    option_env!("NOTES_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Token persistence settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of the `token` cookie in days.
    #[serde(default = "default_cookie_days")]
    pub cookie_days: u32,
    /// Write the cookie with `secure` and `samesite=strict`.
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
}

fn default_cookie_days() -> u32 {
    MAX_COOKIE_DAYS
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_days: default_cookie_days(),
            secure_cookie: true,
        }
    }
}

impl SessionConfig {
    /// Cookie lifetime clamped to the supported 1–7 day range.
    pub fn cookie_days(&self) -> u32 {
        self.cookie_days.clamp(MIN_COOKIE_DAYS, MAX_COOKIE_DAYS)
    }
}

/// Timing knobs for session refreshes triggered by route guards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Minimum gap between two profile refreshes.
    #[serde(default = "default_refresh_throttle")]
    pub refresh_throttle_ms: u64,
    /// Minimum gap before a guard re-checks a session whose role is unknown.
    #[serde(default = "default_role_recheck")]
    pub role_recheck_ms: u64,
}

fn default_refresh_throttle() -> u64 {
    2_000
}

fn default_role_recheck() -> u64 {
    5_000
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            refresh_throttle_ms: default_refresh_throttle(),
            role_recheck_ms: default_role_recheck(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
            ..Self::default()
        }
    }

    /// Builder method to set the cookie lifetime.
    pub fn with_cookie_days(mut self, days: u32) -> Self {
        self.session.cookie_days = days;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "notes-client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.session.cookie_days, 7);
        assert!(config.session.secure_cookie);
        assert_eq!(config.guard.refresh_throttle_ms, 2_000);
        assert_eq!(config.guard.role_recheck_ms, 5_000);
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "http://localhost:8000"

            [session]
            cookie_days = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.session.cookie_days(), 1);
        assert!(config.session.secure_cookie);
        assert_eq!(config.guard, GuardConfig::default());
    }

    #[test]
    fn test_cookie_days_clamped() {
        assert_eq!(ClientConfig::default().with_cookie_days(0).session.cookie_days(), 1);
        assert_eq!(ClientConfig::default().with_cookie_days(30).session.cookie_days(), 7);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        let reparsed = ClientConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }
}
