//! Server-side route middleware.
//!
//! Runs in front of the rendered app: requests for protected pages without a
//! `token` cookie are sent to `/login`, signed-in visitors are sent away from the
//! login and registration pages, and every response gets the same set of
//! security headers.
#![cfg_attr(not(feature = "server"), allow(dead_code))]

/// Paths that need a session cookie.
pub const PROTECTED_PREFIXES: [&str; 2] = ["/dashboard", "/admin"];

/// Pages a signed-in visitor has no use for.
pub const GUEST_ONLY: [&str; 2] = ["/login", "/register"];

pub const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Continue,
    Redirect(&'static str),
}

/// `true` for `prefix` itself and anything below it, not for `/adminx`.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub fn route_decision(path: &str, has_token: bool) -> RouteDecision {
    if !has_token && PROTECTED_PREFIXES.iter().any(|p| under(path, p)) {
        return RouteDecision::Redirect(ui::LOGIN_ROUTE);
    }
    if has_token && GUEST_ONLY.iter().any(|p| under(path, p)) {
        return RouteDecision::Redirect(ui::DASHBOARD_ROUTE);
    }
    RouteDecision::Continue
}

/// Whether any `Cookie` header carries a non-empty session token.
pub fn has_session_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> bool {
    headers
        .into_iter()
        .any(|header| store::parse_cookie(header, store::TOKEN_COOKIE).is_some())
}

#[cfg(feature = "server")]
pub async fn route_middleware(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::http::{header, HeaderValue};
    use axum::response::{IntoResponse, Redirect};

    let has_token = has_session_cookie(
        request
            .headers()
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    );

    let mut response = match route_decision(request.uri().path(), has_token) {
        RouteDecision::Continue => next.run(request).await,
        RouteDecision::Redirect(to) => {
            tracing::debug!(from = %request.uri().path(), to, "route middleware redirect");
            Redirect::temporary(to).into_response()
        }
    };

    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths_need_token() {
        assert_eq!(route_decision("/dashboard", false), RouteDecision::Redirect("/login"));
        assert_eq!(route_decision("/admin/users", false), RouteDecision::Redirect("/login"));
        assert_eq!(route_decision("/admin/users/3/notes/9", false), RouteDecision::Redirect("/login"));
        assert_eq!(route_decision("/dashboard", true), RouteDecision::Continue);
        assert_eq!(route_decision("/admin/users", true), RouteDecision::Continue);
    }

    #[test]
    fn test_prefix_match_is_segment_aware() {
        assert_eq!(route_decision("/administrator", false), RouteDecision::Continue);
        assert_eq!(route_decision("/dashboards", false), RouteDecision::Continue);
    }

    #[test]
    fn test_guest_pages_redirect_when_signed_in() {
        assert_eq!(route_decision("/login", true), RouteDecision::Redirect("/dashboard"));
        assert_eq!(route_decision("/register", true), RouteDecision::Redirect("/dashboard"));
        assert_eq!(route_decision("/login", false), RouteDecision::Continue);
        assert_eq!(route_decision("/", false), RouteDecision::Continue);
        assert_eq!(route_decision("/", true), RouteDecision::Continue);
    }

    #[test]
    fn test_session_cookie_detection() {
        assert!(has_session_cookie(["theme=dark; token=abc"]));
        assert!(has_session_cookie(["theme=dark", "token=abc"]));
        assert!(!has_session_cookie(["token="]));
        assert!(!has_session_cookie(["tokens=abc"]));
        assert!(!has_session_cookie(Vec::<&str>::new()));
    }

    #[test]
    fn test_security_header_names_are_lowercase() {
        for (name, _) in SECURITY_HEADERS {
            assert_eq!(name, name.to_ascii_lowercase());
        }
    }
}
