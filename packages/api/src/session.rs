//! # Session service and session state
//!
//! [`AuthService`] owns the authentication flows: login, registration, logout
//! and the cached "who am I" lookup. It is stateless apart from what the
//! [`TokenStore`](store::TokenStore) behind its client persists.
//!
//! [`SessionState`] is the in-memory view the UI renders from: the current
//! profile, whether the user is authenticated, whether a check is in flight and
//! when the profile was last refreshed. The UI keeps it in a signal; every
//! transition is a method here so the rules can be tested without a renderer.
//!
//! ## Refresh throttling
//!
//! Guards and pages call for a profile refresh on mount, and a refresh can
//! re-render the caller. To break that loop a refresh within
//! [`GuardConfig::refresh_throttle_ms`] of the previous one is a no-op that
//! returns the profile already held. The timestamp is recorded *before* the
//! request goes out, so a second caller during the request is throttled too.

use std::ops::DerefMut;

use store::GuardConfig;

use crate::client::ApiClient;
use crate::error::{ApiError, ServiceError, SESSION_EXPIRED};
use crate::models::{LoginRequest, Registration, Role, UserCreate, UserResponse};
use crate::transport::Transport;

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";
pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    /// Milliseconds since the epoch of the last profile refresh.
    pub last_refresh: Option<u64>,
}

impl Default for SessionState {
    /// Loading until the first initialization finishes.
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
            last_refresh: None,
        }
    }
}

/// What a refresh request should do, decided from the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshPlan {
    /// Refreshed too recently; hand back what we have.
    Throttled(Option<UserResponse>),
    NoToken,
    Fetch,
}

impl SessionState {
    pub fn logged_in(&mut self, user: UserResponse, now: u64) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
        self.last_refresh = Some(now);
    }

    pub fn logged_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.is_loading = false;
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserResponse::is_admin)
    }

    /// Authenticated, but the profile carries no role yet.
    pub fn role_missing(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_none_or(|u| u.role.is_none())
    }

    pub fn refreshed_within(&self, now: u64, window_ms: u64) -> bool {
        self.last_refresh
            .is_some_and(|at| now.saturating_sub(at) < window_ms)
    }

    /// First half of a refresh. Marks the refresh as started when a fetch is due.
    pub fn plan_refresh(&mut self, now: u64, throttle_ms: u64, has_token: bool) -> RefreshPlan {
        if self.refreshed_within(now, throttle_ms) {
            tracing::debug!("skipping profile refresh, last one was too recent");
            return RefreshPlan::Throttled(self.user.clone());
        }
        if !has_token {
            return RefreshPlan::NoToken;
        }
        self.is_loading = true;
        self.last_refresh = Some(now);
        RefreshPlan::Fetch
    }

    /// Second half of a refresh. Returns the profile to report to the caller.
    pub fn finish_refresh(&mut self, result: Result<UserResponse, ServiceError>) -> Option<UserResponse> {
        self.is_loading = false;
        match result {
            Ok(user) => {
                if self.user.as_ref() != Some(&user) {
                    self.user = Some(user.clone());
                }
                self.is_authenticated = true;
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile refresh failed");
                if e.is_session_expired() {
                    self.logged_out();
                }
                None
            }
        }
    }
}

pub struct AuthService<T> {
    client: ApiClient<T>,
    guard: GuardConfig,
}

impl<T> Clone for AuthService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<T: Transport> AuthService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self::with_config(client, GuardConfig::default())
    }

    pub fn with_config(client: ApiClient<T>, guard: GuardConfig) -> Self {
        Self { client, guard }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn guard_config(&self) -> &GuardConfig {
        &self.guard
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.tokens().is_authenticated()
    }

    /// The cached profile, only while a token backs it.
    pub fn cached_user(&self) -> Option<UserResponse> {
        let tokens = self.client.tokens();
        if !tokens.is_authenticated() {
            tokens.clear_user();
            return None;
        }
        tokens.cached_user()
    }

    /// Exchange credentials for a token, then load and cache the profile.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ServiceError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation(CREDENTIALS_REQUIRED.to_string()));
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token = self.client.login(&request).await.map_err(|e| match e {
            ApiError::Decode(_) => ServiceError::Failed("Invalid response from server".into()),
            other => ServiceError::Failed(other.detail_or("Login failed - server error")),
        })?;
        if token.access_token.is_empty() {
            tracing::error!("login response is missing an access token");
            return Err(ServiceError::Failed("Invalid response from server".into()));
        }

        let tokens = self.client.tokens();
        tokens
            .save_token(&token.access_token)
            .map_err(|e| ServiceError::Failed(format!("Could not store session: {e}")))?;
        // A profile cached by an earlier session must not leak into this one.
        tokens.clear_user();
        tracing::info!("login succeeded");

        self.get_current_user()
            .await
            .map_err(|e| ServiceError::ProfileFetch(e.to_string()))
    }

    /// The cached profile, or one request to `/auth/me` that fills the cache.
    pub async fn get_current_user(&self) -> Result<UserResponse, ServiceError> {
        if let Some(user) = self.cached_user() {
            tracing::debug!("using cached profile");
            return Ok(user);
        }
        self.fetch_current_user().await
    }

    /// Always asks the server, then replaces the cached profile.
    pub async fn fetch_current_user(&self) -> Result<UserResponse, ServiceError> {
        let user = self
            .client
            .get_current_user()
            .await
            .map_err(|e| match e.status() {
                Some(401) => ServiceError::SessionExpired(SESSION_EXPIRED.to_string()),
                _ => ServiceError::Failed(e.detail_or("Failed to fetch user data")),
            })?;
        if let Err(e) = self.client.tokens().save_user(&user) {
            tracing::warn!(error = %e, "could not cache profile");
        }
        Ok(user)
    }

    /// Client-local: the server keeps no session to end.
    pub fn logout(&self) {
        self.client.tokens().clear_token();
        tracing::info!("logged out");
    }

    pub async fn register(&self, registration: &Registration) -> Result<UserResponse, ServiceError> {
        let user = validate_registration(registration)?;
        self.client.register(&user).await.map_err(|e| match e {
            ApiError::Network(_) => ServiceError::Failed(
                "Registration failed due to a network error. Please try again later.".into(),
            ),
            ref err if err.status() == Some(400) => {
                ServiceError::Failed(err.detail_or("Email already registered"))
            }
            ref err if err.status() == Some(422) => {
                ServiceError::Validation("Invalid data. Please check your inputs.".into())
            }
            err => ServiceError::Failed(err.detail_or("Registration failed")),
        })
    }

    /// Build the session state at startup from whatever token is stored.
    pub async fn initialize(&self, now: u64) -> SessionState {
        let mut state = SessionState::default();
        if !self.is_authenticated() {
            tracing::debug!("no stored token");
            state.logged_out();
            return state;
        }
        match self.get_current_user().await {
            Ok(user) => state.logged_in(user, now),
            Err(e) => {
                tracing::warn!(error = %e, "could not restore session");
                self.logout();
                state.logged_out();
            }
        }
        state
    }

    /// Throttled profile refresh.
    ///
    /// `state` hands out short-lived write access to wherever the session state
    /// lives. Access is taken once before the request and once after it, never
    /// across the await.
    pub async fn refresh_user_data<S, G>(&self, now: u64, mut state: S) -> Option<UserResponse>
    where
        S: FnMut() -> G,
        G: DerefMut<Target = SessionState>,
    {
        let plan = state().plan_refresh(now, self.guard.refresh_throttle_ms, self.is_authenticated());
        match plan {
            RefreshPlan::Throttled(user) => user,
            RefreshPlan::NoToken => None,
            RefreshPlan::Fetch => {
                let result = self.fetch_current_user().await;
                let expired = matches!(result, Err(ref e) if e.is_session_expired());
                let user = state().finish_refresh(result);
                if expired {
                    tracing::info!("session expired during refresh, logging out");
                    self.logout();
                }
                user
            }
        }
    }
}

/// Local checks before `POST /auth/register`. The role is always `user`.
pub fn validate_registration(registration: &Registration) -> Result<UserCreate, ServiceError> {
    let email = registration.email.trim();
    let name = registration.name.trim();
    if email.is_empty() || name.is_empty() || registration.password.is_empty() {
        return Err(ServiceError::Validation(FIELDS_REQUIRED.to_string()));
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(PASSWORD_TOO_SHORT.to_string()));
    }
    Ok(UserCreate {
        email: email.to_string(),
        name: name.to_string(),
        password: registration.password.clone(),
        role: Role::User,
    })
}
