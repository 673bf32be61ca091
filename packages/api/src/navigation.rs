//! Page-level navigation used by the client's 401 handling.

/// Paths that must never trigger a redirect to the login page.
pub const AUTH_PAGES: [&str; 2] = ["/login", "/register"];

pub const LOGIN_PATH: &str = "/login";

pub fn is_auth_page(path: &str) -> bool {
    AUTH_PAGES.iter().any(|page| {
        path.strip_prefix(page)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    })
}

/// Where the user currently is and how to send them elsewhere.
pub trait Redirector {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Used where there is no page to navigate (server-side rendering).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRedirector;

impl Redirector for NoopRedirector {
    fn current_path(&self) -> String {
        String::new()
    }

    fn redirect(&self, path: &str) {
        tracing::debug!(path, "redirect requested outside a browser");
    }
}

/// Full-page navigation through `window.location`.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRedirector;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl Redirector for BrowserRedirector {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to redirect to {}: {:?}", path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_pages() {
        assert!(is_auth_page("/login"));
        assert!(is_auth_page("/register"));
        assert!(is_auth_page("/login?error=expired"));
        assert!(!is_auth_page("/dashboard"));
        assert!(!is_auth_page("/loginx"));
        assert!(!is_auth_page(""));
    }
}
