//! Test doubles: a scripted transport and a redirector that records navigation.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use store::{MemoryCookies, MemoryStorage, SessionConfig, TokenStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::navigation::Redirector;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Replays queued responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn push(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_error(&self, err: ApiError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".into())))
    }
}

#[derive(Clone, Default)]
pub struct RecordingRedirector {
    path: Rc<RefCell<String>>,
    redirects: Rc<RefCell<Vec<String>>>,
}

impl RecordingRedirector {
    pub fn set_path(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }
}

impl Redirector for RecordingRedirector {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
        self.set_path(path);
    }
}

pub struct Fixture {
    pub client: ApiClient<ScriptedTransport>,
    pub tokens: TokenStore,
    pub storage: MemoryStorage,
    pub cookies: MemoryCookies,
    pub transport: ScriptedTransport,
    pub redirector: RecordingRedirector,
}

pub fn fixture() -> Fixture {
    let storage = MemoryStorage::new();
    let cookies = MemoryCookies::new();
    let tokens = TokenStore::new(storage.clone(), cookies.clone(), SessionConfig::default());
    let transport = ScriptedTransport::default();
    let redirector = RecordingRedirector::default();
    redirector.set_path("/dashboard");
    let client = ApiClient::new(transport.clone(), tokens.clone(), redirector.clone());
    Fixture {
        client,
        tokens,
        storage,
        cookies,
        transport,
        redirector,
    }
}

pub fn user_json(id: i64, role: &str) -> String {
    serde_json::json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "name": format!("User {id}"),
        "role": role,
        "is_active": true,
        "created_at": "2024-01-01T00:00:00",
    })
    .to_string()
}

pub fn note_json(id: i64, owner_id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": null,
        "owner_id": owner_id,
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00",
    })
}
