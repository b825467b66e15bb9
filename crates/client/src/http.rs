//! `reqwest`-backed transport.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use talentdesk_core::ApiError;

use crate::config::ClientConfig;
use crate::transport::{ApiRequest, CredentialProvider, Method, Transport};

/// Production transport speaking JSON over HTTP.
///
/// The bearer credential is read from the injected provider on every request;
/// this struct keeps no credential state of its own.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpTransport {
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            base_url: config.base_url,
            client: reqwest::Client::new(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a response onto the error taxonomy.
    ///
    /// Non-success statuses surface the server's `message` field when the
    /// body carries one; 401 is classified separately because it forces a
    /// session reset when hit during verification.
    async fn settle(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|err| ApiError::transport(err.to_string()))?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|err| ApiError::malformed(format!("undecodable response body: {err}")));
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(ApiError::unauthorized(message))
        } else {
            Err(ApiError::rejected(status.as_u16(), message))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder = self.authorize(builder);

        tracing::debug!(path = %request.path, "sending api request");
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::transport(err.to_string()))?;
        Self::settle(response).await
    }

    async fn upload(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let builder = self.authorize(self.client.post(self.url(path)).multipart(form));

        tracing::debug!(path = %path, "uploading multipart request");
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::transport(err.to_string()))?;
        Self::settle(response).await
    }
}
