//! Cookie attributes and `Cookie` header parsing.
//!
//! The same parsing is used by the browser [`CookieJar`](crate::CookieJar) (reading
//! `document.cookie`) and by the server-side route middleware (reading the request's
//! `Cookie` header), so both sides agree on what counts as "has a token".

use chrono::{DateTime, Utc};

use crate::config::SessionConfig;

/// Name of the cookie that carries the bearer token.
pub const TOKEN_COOKIE: &str = "token";

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const DAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "strict",
            SameSite::Lax => "lax",
        }
    }
}

/// A cookie write, rendered into the `document.cookie` assignment syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct CookieSpec {
    pub name: String,
    pub value: String,
    /// Lifetime in days. `None` writes a browser-session cookie.
    pub expires_in_days: Option<u32>,
    pub path: String,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl CookieSpec {
    /// The token cookie as configured for this client.
    pub fn session_token(token: &str, config: &SessionConfig) -> Self {
        Self {
            name: TOKEN_COOKIE.to_string(),
            value: token.to_string(),
            expires_in_days: Some(config.cookie_days()),
            path: "/".to_string(),
            secure: config.secure_cookie,
            same_site: config.secure_cookie.then_some(SameSite::Strict),
        }
    }

    /// A write that makes the browser drop the named cookie.
    pub fn expired(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            expires_in_days: Some(0),
            path: "/".to_string(),
            secure: false,
            same_site: None,
        }
    }

    /// Render as `name=value;expires=...;path=/;secure;samesite=strict`.
    ///
    /// `now_ms` is the current Unix time in milliseconds; a zero-day lifetime
    /// renders the Unix epoch so the browser expires the cookie immediately.
    pub fn render(&self, now_ms: u64) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(days) = self.expires_in_days {
            let at = if days == 0 {
                0
            } else {
                now_ms.saturating_add(u64::from(days) * DAY_MS)
            };
            out.push_str(";expires=");
            out.push_str(&http_date(at));
        }
        out.push_str(";path=");
        out.push_str(&self.path);
        if self.secure {
            out.push_str(";secure");
        }
        if let Some(same_site) = self.same_site {
            out.push_str(";samesite=");
            out.push_str(same_site.as_str());
        }
        out
    }
}

fn http_date(ms: u64) -> String {
    let ms = i64::try_from(ms).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .format(HTTP_DATE)
        .to_string()
}

/// Find `name` in a `Cookie` header / `document.cookie` string.
///
/// Empty values count as absent: an expired-but-not-yet-evicted `token=` must not
/// authenticate anyone.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_hardened_token_cookie() {
        let config = SessionConfig::default();
        let cookie = CookieSpec::session_token("abc", &config);
        assert_eq!(
            cookie.render(0),
            "token=abc;expires=Thu, 08 Jan 1970 00:00:00 GMT;path=/;secure;samesite=strict"
        );
    }

    #[test]
    fn test_render_without_hardening() {
        let config = SessionConfig {
            cookie_days: 1,
            secure_cookie: false,
            ..SessionConfig::default()
        };
        let cookie = CookieSpec::session_token("abc", &config);
        assert_eq!(
            cookie.render(0),
            "token=abc;expires=Fri, 02 Jan 1970 00:00:00 GMT;path=/"
        );
    }

    #[test]
    fn test_expired_cookie_points_at_epoch() {
        let rendered = CookieSpec::expired("token").render(1_700_000_000_000);
        assert_eq!(rendered, "token=;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/");
    }

    #[test]
    fn test_parse_cookie() {
        let header = "theme=dark; token=xyz.123; other=1";
        assert_eq!(parse_cookie(header, "token"), Some("xyz.123".to_string()));
        assert_eq!(parse_cookie(header, "missing"), None);
        assert_eq!(parse_cookie("token=; a=b", "token"), None);
        assert_eq!(parse_cookie("", "token"), None);
        assert_eq!(parse_cookie("mytoken=a", "token"), None);
    }
}
