//! # Transport: the network seam under [`ApiClient`](crate::ApiClient)
//!
//! [`Transport`] sends one fully-described [`ApiRequest`] and returns the raw
//! status and body. It knows nothing about tokens, 401 handling or decoding;
//! those belong to the client. [`HttpTransport`] is the `reqwest`
//! implementation used in the browser (fetch) and natively (hyper).
//!
//! Futures are not required to be `Send`: in the browser everything runs on the
//! single event-loop thread.

use std::fmt;
use std::future::Future;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// One outbound request. `path` is relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    /// Filled in by the client's request interceptor.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: serde::Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Body::Form(fields);
        self
    }
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// `reqwest`-backed transport rooted at the API base URL.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(ref value) => builder.json(value),
            Body::Form(ref fields) => builder.form(fields),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
