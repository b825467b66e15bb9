//! Transport seam between the state layer and the network.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use talentdesk_core::ApiError;

/// Request method at the collaborator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One outgoing request.
///
/// `path` is joined onto the configured base URL; the body, when present, is
/// sent as JSON.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
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

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(
        mut self,
        query: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.query = query
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

/// Network collaborator: sends requests and yields decoded JSON or a
/// classified failure. Implementations must not retry on their own; retry
/// policy belongs to callers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;

    /// Multipart upload of a single file field. Only the resume endpoint
    /// needs this, so a transport may opt out.
    async fn upload(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        let _ = (path, field, filename, bytes);
        Err(ApiError::transport("multipart upload not supported"))
    }
}

/// Supplies the bearer credential attached to outgoing requests.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Mutable credential holder for the current session.
///
/// The transport reads this on every request instead of keeping a default
/// header of its own, so there is no hidden process-wide credential state.
/// Login/verify success and logout are the only writers; the last write wins.
#[derive(Default)]
pub struct CredentialCell {
    token: RwLock<Option<String>>,
}

impl CredentialCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn current(&self) -> Option<String> {
        self.token.read().clone()
    }
}

impl CredentialProvider for CredentialCell {
    fn bearer_token(&self) -> Option<String> {
        self.current()
    }
}
