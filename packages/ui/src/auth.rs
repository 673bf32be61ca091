//! Authentication context and hooks for the UI.

use api::{ServiceError, SessionState, UserResponse};
use dioxus::prelude::*;
use store::clock::now_millis;
use store::ClientConfig;

use crate::services::AppServices;

/// Session state plus the services that change it.
///
/// `Copy`, so it can be moved into any number of event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct AuthHandle {
    pub state: Signal<SessionState>,
    services: Signal<AppServices>,
}

impl AuthHandle {
    pub fn services(&self) -> AppServices {
        self.services.read().clone()
    }

    pub fn user(&self) -> Option<UserResponse> {
        self.state.read().user.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin()
    }

    /// Restore the session from a stored token. Runs once on mount.
    pub async fn initialize(self) {
        let mut state = self.state;
        let restored = self.services().auth.initialize(now_millis()).await;
        tracing::debug!(authenticated = restored.is_authenticated, "session initialized");
        state.set(restored);
    }

    pub async fn login(self, username: String, password: String) -> Result<UserResponse, ServiceError> {
        let mut state = self.state;
        state.write().is_loading = true;
        let result = self.services().auth.login(&username, &password).await;
        match result {
            Ok(ref user) => state.write().logged_in(user.clone(), now_millis()),
            Err(ref e) => {
                tracing::warn!(error = %e, "login failed");
                state.write().is_loading = false;
            }
        }
        result
    }

    /// Clear the local session. Navigation is left to the caller.
    pub fn logout(self) {
        let mut state = self.state;
        self.services().auth.logout();
        state.write().logged_out();
    }

    /// Throttled profile refresh; see [`api::session`].
    pub async fn refresh(self) -> Option<UserResponse> {
        let state = self.state;
        self.services()
            .auth
            .refresh_user_data(now_millis(), move || state.write_unchecked())
            .await
    }
}

/// Get the authentication handle provided by [`AuthProvider`].
pub fn use_auth() -> AuthHandle {
    use_context::<AuthHandle>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(#[props(default)] config: ClientConfig, children: Element) -> Element {
    let state = use_signal(SessionState::default);
    let services = use_signal(|| AppServices::new(&config));
    let handle = use_context_provider(|| AuthHandle { state, services });

    // Restore the session on mount
    let _ = use_resource(move || async move {
        handle.initialize().await;
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                auth.logout();
                nav.push(crate::guard::LOGIN_ROUTE);
            },
            "{label}"
        }
    }
}
