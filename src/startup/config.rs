//! Client configuration.
//!
//! Values come from defaults, then the environment (`MURMUR_URL`,
//! `MURMUR_SESSION`), then CLI flags applied through the builder methods.

use crate::error::{ClientError, ClientResult};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Default chat endpoint path
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";
/// Default health endpoint path
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Environment variable overriding the backend address.
pub const ENV_BASE_URL: &str = "MURMUR_URL";
/// Environment variable supplying a session id.
pub const ENV_SESSION_ID: &str = "MURMUR_SESSION";

/// Configuration for talking to the chat backend.
///
/// Use the builder pattern to customize.
///
/// # Example
///
/// ```ignore
/// use murmur::startup::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://localhost:9000")
///     .with_session_id("sess-1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend (no trailing path)
    pub base_url: String,
    /// Session id sent with every chat request, if any
    pub session_id: Option<String>,
    /// Path of the streaming chat endpoint
    pub chat_path: String,
    /// Path of the health endpoint
    pub health_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_id: None,
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the session id. Blank ids are treated as absent.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        let trimmed = session_id.trim();
        self.session_id = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = normalize_path(path.into());
        self
    }

    pub fn with_health_path(mut self, path: impl Into<String>) -> Self {
        self.health_path = normalize_path(path.into());
        self
    }

    /// Create config from `MURMUR_URL` and `MURMUR_SESSION`.
    /// Unset or empty variables keep the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }
        if let Ok(session) = std::env::var(ENV_SESSION_ID) {
            config = config.with_session_id(session);
        }

        config
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> ClientResult<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Config(format!(
                "unsupported URL scheme '{}' in '{}'",
                other, self.base_url
            ))),
        }
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    /// Full URL of the health endpoint.
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }
}

fn normalize_path(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}
