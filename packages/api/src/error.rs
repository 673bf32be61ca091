//! # Error types
//!
//! Two layers, matching the two audiences:
//!
//! - [`ApiError`] is what the HTTP client reports: a non-2xx status with the
//!   server's `detail` text when it sent one, a transport failure, or a body that
//!   did not decode.
//! - [`ServiceError`] is what the session and domain services hand to the UI. Its
//!   `Display` text is meant to be shown inline as-is.
//!
//! [`ServiceError::from_api`] is the default mapping; services that need more
//! specific wording (the admin service's permission messages) match on
//! [`ApiError::status`] first and fall back to it.

use thiserror::Error;

pub const SESSION_EXPIRED: &str = "Session expired, please login again";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-provided explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Server detail text, or `fallback` when the server gave none.
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Rejected client-side before any request was made.
    #[error("{0}")]
    Validation(String),
    /// The server answered 401; the local session has been torn down.
    #[error("{0}")]
    SessionExpired(String),
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
    /// The token exchange succeeded but the follow-up profile request did not.
    #[error("Logged in but failed to load your profile: {0}")]
    ProfileFetch(String),
}

impl ServiceError {
    /// Default mapping from a client error, using `fallback` when the server
    /// explained nothing.
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        match err.status() {
            Some(401) => ServiceError::SessionExpired(SESSION_EXPIRED.to_string()),
            Some(403) => ServiceError::PermissionDenied(err.detail_or("Permission denied")),
            Some(404) => ServiceError::NotFound(err.detail_or("Resource not found")),
            _ => ServiceError::Failed(err.detail_or(fallback)),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ServiceError::SessionExpired(_))
    }
}
