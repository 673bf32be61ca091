//! # API crate: typed client for the notes REST API
//!
//! Everything the frontend knows about the server lives here: wire models, the
//! HTTP client with its token and 401 handling, and the services the UI calls.
//! Nothing in this crate renders; it runs the same in the browser and in native
//! tests.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | none | Request and response payloads (`UserResponse`, `NoteResponse`, `Token`, ...) |
//! | [`transport`] | none | `Transport` trait and the `reqwest` implementation |
//! | [`client`] | none | `ApiClient`: bearer injection, 401 teardown and redirect, typed endpoints |
//! | [`navigation`] | `web` for the browser redirector | Where the user is and how to move them |
//! | [`session`] | none | `AuthService` login/register/logout and `SessionState` transitions |
//! | [`notes`] | none | `NoteService` CRUD and note form validation |
//! | [`admin`] | none | `AdminService` user listing, role and status changes |
//! | [`error`] | none | `ApiError` (transport level) and `ServiceError` (shown to users) |
//!
//! ## Wiring
//!
//! One [`TokenStore`](store::TokenStore) and one [`ApiClient`] are built at
//! startup and cloned into each service. Clones share the same transport and
//! storage surfaces.

pub mod admin;
pub mod client;
pub mod error;
pub mod models;
pub mod navigation;
pub mod notes;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use admin::AdminService;
pub use client::ApiClient;
pub use error::{ApiError, ServiceError};
pub use models::{NoteResponse, Role, UserResponse};
pub use navigation::{NoopRedirector, Redirector};
pub use notes::NoteService;
pub use session::{AuthService, RefreshPlan, SessionState};
pub use transport::{HttpTransport, Transport};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use navigation::BrowserRedirector;

/// The client stack used by the app: `reqwest` over HTTP.
pub type HttpClient = ApiClient<HttpTransport>;
