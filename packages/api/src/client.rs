//! # HTTP client for the notes API
//!
//! [`ApiClient`] is the only code that talks to the network. Every request goes
//! through [`ApiClient::execute`], which plays the role of a pair of interceptors:
//!
//! 1. **Before send:** resolve the bearer token through the [`TokenStore`]
//!    (including its sync-on-read repair) and attach it. Without a token the
//!    request goes out unauthenticated.
//! 2. **After receive:** on `401 Unauthorized`, tear down the local session
//!    (token and cached profile) and send the user to `/login`, unless they are
//!    already on `/login` or `/register`.
//!
//! Non-2xx responses become [`ApiError::Status`] carrying the server's `detail`
//! text. FastAPI-style validation errors (`detail` as a list of `{msg}` objects)
//! are flattened into one line.
//!
//! The typed methods below are thin wrappers: build the request, decode the
//! body. Operation-specific wording is added by the services on top.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::TokenStore;

use crate::error::ApiError;
use crate::models::{
    LoginRequest, NoteCreate, NoteResponse, NoteUpdate, PaginatedUsers, Role, Token, UserCreate,
    UserQuery, UserResponse,
};
use crate::navigation::{is_auth_page, Redirector, LOGIN_PATH};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Every endpoint lives under this prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Default page for `GET /notes/`.
pub const DEFAULT_NOTES_LIMIT: u32 = 100;

pub struct ApiClient<T> {
    transport: Rc<T>,
    tokens: TokenStore,
    redirector: Rc<dyn Redirector>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            tokens: self.tokens.clone(),
            redirector: Rc::clone(&self.redirector),
        }
    }
}

#[derive(Serialize)]
struct RoleChange {
    role: Role,
}

#[derive(Serialize)]
struct StatusChange {
    is_active: bool,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, tokens: TokenStore, redirector: impl Redirector + 'static) -> Self {
        Self {
            transport: Rc::new(transport),
            tokens,
            redirector: Rc::new(redirector),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Send a request through both interceptors. Non-2xx is an error.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.bearer = self.tokens.token();
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, authenticated = request.bearer.is_some(), "api request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %path, error = %e, "api request failed");
                return Err(e);
            }
        };
        tracing::debug!(%method, %path, status = response.status, "api response");

        if response.status == 401 {
            self.handle_unauthorized();
        }
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                detail: extract_detail(&response.body),
            });
        }
        Ok(response)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn handle_unauthorized(&self) {
        self.tokens.clear_token();
        let here = self.redirector.current_path();
        if is_auth_page(&here) {
            tracing::debug!(path = %here, "401 on an auth page, not redirecting");
            return;
        }
        tracing::info!(from = %here, "session rejected by server, redirecting to login");
        self.redirector.redirect(LOGIN_PATH);
    }

    // Auth

    pub async fn register(&self, user: &UserCreate) -> Result<UserResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("{API_PREFIX}/auth/register")).json(user)?)
            .await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<Token, ApiError> {
        self.fetch(ApiRequest::post(format!("{API_PREFIX}/auth/login")).form(credentials.form_fields()))
            .await
    }

    pub async fn get_current_user(&self) -> Result<UserResponse, ApiError> {
        self.fetch(ApiRequest::get(format!("{API_PREFIX}/auth/me"))).await
    }

    // Notes

    pub async fn get_notes(&self, skip: u32, limit: u32) -> Result<Vec<NoteResponse>, ApiError> {
        self.fetch(
            ApiRequest::get(format!("{API_PREFIX}/notes/"))
                .query("skip", skip)
                .query("limit", limit),
        )
        .await
    }

    pub async fn get_note(&self, note_id: i64) -> Result<NoteResponse, ApiError> {
        self.fetch(ApiRequest::get(format!("{API_PREFIX}/notes/{note_id}")))
            .await
    }

    pub async fn get_notes_by_user(&self, user_id: i64) -> Result<Vec<NoteResponse>, ApiError> {
        self.fetch(ApiRequest::get(format!("{API_PREFIX}/notes/by-user/{user_id}")))
            .await
    }

    pub async fn create_note(&self, note: &NoteCreate) -> Result<NoteResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("{API_PREFIX}/notes/")).json(note)?)
            .await
    }

    pub async fn update_note(&self, note_id: i64, note: &NoteUpdate) -> Result<NoteResponse, ApiError> {
        self.fetch(ApiRequest::put(format!("{API_PREFIX}/notes/{note_id}")).json(note)?)
            .await
    }

    pub async fn delete_note(&self, note_id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("{API_PREFIX}/notes/{note_id}")))
            .await
            .map(|_| ())
    }

    // Admin

    pub async fn get_users(&self, query: &UserQuery) -> Result<PaginatedUsers, ApiError> {
        let mut request = ApiRequest::get(format!("{API_PREFIX}/admin/users"))
            .query("page", query.page)
            .query("size", query.size);
        if let Some(role) = query.role {
            request = request.query("role", role.as_str());
        }
        if let Some(active) = query.is_active {
            request = request.query("is_active", active);
        }
        self.fetch(request).await
    }

    pub async fn get_user_details(&self, user_id: i64) -> Result<UserResponse, ApiError> {
        self.fetch(ApiRequest::get(format!("{API_PREFIX}/admin/users/{user_id}")))
            .await
    }

    pub async fn update_user_role(&self, user_id: i64, role: Role) -> Result<UserResponse, ApiError> {
        self.fetch(ApiRequest::put(format!("{API_PREFIX}/admin/users/{user_id}")).json(&RoleChange { role })?)
            .await
    }

    pub async fn update_user_status(&self, user_id: i64, is_active: bool) -> Result<UserResponse, ApiError> {
        self.fetch(
            ApiRequest::put(format!("{API_PREFIX}/admin/users/{user_id}"))
                .json(&StatusChange { is_active })?,
        )
        .await
    }
}

/// Pull a human-readable message out of an error body.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
