//! Construction of the client stack for the current platform.
//!
//! In the browser the token store sits on `sessionStorage` plus `document.cookie`
//! and 401s navigate through `window.location`. Everywhere else (server-side
//! rendering, native tests) the surfaces are in-memory and navigation is a no-op.

use std::rc::Rc;

use api::{AdminService, AuthService, HttpClient, HttpTransport, NoteService};
use store::{ClientConfig, GuardConfig, KeyValueStore, TokenStore};

/// Everything the views need to talk to the API. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService<HttpTransport>,
    pub notes: NoteService<HttpTransport>,
    pub admin: AdminService<HttpTransport>,
}

impl AppServices {
    pub fn new(config: &ClientConfig) -> Self {
        let client = make_client(config);
        Self {
            auth: AuthService::with_config(client.clone(), config.guard.clone()),
            notes: NoteService::new(client.clone()),
            admin: AdminService::new(client),
        }
    }

    pub fn guard_config(&self) -> &GuardConfig {
        self.auth.guard_config()
    }

    /// Session-scoped storage, shared with the token store.
    pub fn session_storage(&self) -> Rc<dyn KeyValueStore> {
        self.auth.client().tokens().storage()
    }
}

fn make_client(config: &ClientConfig) -> HttpClient {
    let transport = HttpTransport::new(config.api.base_url.clone());
    tracing::debug!(base_url = %transport.base_url(), "building api client");

    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let tokens = TokenStore::new(
            store::BrowserStorage::session(),
            store::DocumentCookies,
            config.session.clone(),
        );
        api::ApiClient::new(transport, tokens, api::BrowserRedirector)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let tokens = TokenStore::new(
            store::MemoryStorage::new(),
            store::MemoryCookies::new(),
            config.session.clone(),
        );
        api::ApiClient::new(transport, tokens, api::NoopRedirector)
    }
}

/// Long-lived storage for preferences such as the theme.
pub fn preference_storage() -> Rc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Rc::new(store::BrowserStorage::local())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Rc::new(store::MemoryStorage::new())
    }
}
