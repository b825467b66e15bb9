//! Client configuration.

/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const BASE_URL_ENV: &str = "TALENTDESK_API_URL";

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every request path is joined onto, without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read configuration from `TALENTDESK_API_URL`, falling back to the
    /// local development API.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}
