//! Chat backend client.
//!
//! Binds a [`ClientConfig`] to an [`HttpClient`] implementation. Each
//! [`ChatClient::send`] runs one request through the [`StreamDriver`].

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::driver::{StreamDriver, StreamReport};
use crate::error::ClientResult;
use crate::models::{ChatRequest, HealthStatus};
use crate::startup::ClientConfig;
use crate::traits::{Headers, HttpClient, HttpError, ReplyView};

/// Client for the streaming chat endpoint and the health endpoint.
pub struct ChatClient<C: HttpClient + ?Sized = dyn HttpClient> {
    config: ClientConfig,
    http: Arc<C>,
}

impl ChatClient<ReqwestHttpClient> {
    /// Client using reqwest, after validating `config`.
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        Ok(Self::with_http(config, Arc::new(ReqwestHttpClient::new())))
    }
}

impl<C: HttpClient + ?Sized> ChatClient<C> {
    /// Client over any transport. The config is not validated.
    pub fn with_http(config: ClientConfig, http: Arc<C>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request for `message`, attaching the configured session.
    pub fn request_for(&self, message: impl Into<String>) -> ChatRequest {
        ChatRequest::new(message).with_session(self.config.session_id.clone())
    }

    /// Send one message and render the streamed reply into `view`.
    ///
    /// The view is borrowed for the whole stream, so only one request can be
    /// outstanding per view.
    pub async fn send<V: ReplyView>(&self, request: &ChatRequest, view: &mut V) -> StreamReport {
        let url = self.config.chat_url();
        StreamDriver::new(self.http.as_ref(), &url)
            .run(request, view)
            .await
    }

    /// Fetch and decode the health endpoint.
    ///
    /// A non-success status is returned as [`HttpError::ServerError`].
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.config.health_url();
        let response = self.http.get(&url, &Headers::new()).await?;

        if !response.is_success() {
            return Err(HttpError::ServerError {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).trim().to_string(),
            }
            .into());
        }

        Ok(response.json::<HealthStatus>()?)
    }

    /// Check if the backend is healthy and reachable.
    ///
    /// # Returns
    /// `true` if the health endpoint answers 2xx with `status == "healthy"`,
    /// `false` for any other status. Transport and decode failures are errors.
    pub async fn health_check(&self) -> ClientResult<bool> {
        match self.health().await {
            Ok(health) => Ok(health.is_healthy()),
            Err(crate::error::ClientError::Http(HttpError::ServerError { status, .. })) => {
                tracing::debug!("Health endpoint returned {}", status);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse, RecordingView};
    use crate::driver::StreamOutcome;
    use crate::error::ClientError;
    use crate::traits::Response;
    use bytes::Bytes;

    fn client(http: MockHttpClient) -> ChatClient<MockHttpClient> {
        ChatClient::with_http(
            ClientConfig::new().with_base_url("http://test.local"),
            Arc::new(http),
        )
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let result = ChatClient::from_config(ClientConfig::new().with_base_url("::nope::"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_request_for_attaches_session() {
        let http = MockHttpClient::new();
        let client = ChatClient::with_http(
            ClientConfig::new().with_session_id("sess-9"),
            Arc::new(http),
        );
        let request = client.request_for("hi");
        assert_eq!(request.message, "hi");
        assert_eq!(request.session_id.as_deref(), Some("sess-9"));
    }

    #[tokio::test]
    async fn test_send_posts_to_chat_url() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test.local/api/chat",
            MockResponse::Stream(vec![Bytes::from(
                "data: {\"type\":\"text_chunk\",\"data\":\"yo\"}\n\ndata: {\"type\":\"complete\"}\n\n",
            )]),
        );
        let client = client(http.clone());
        let mut view = RecordingView::new();

        let report = client.send(&client.request_for("hey"), &mut view).await;

        assert_eq!(report.outcome, StreamOutcome::Completed);
        assert_eq!(view.rendered(), "yo");
        assert_eq!(http.get_requests()[0].url, "http://test.local/api/chat");
    }

    #[tokio::test]
    async fn test_health_check_healthy() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test.local/health",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"status":"healthy","service":"agent","version":"1.0.0"}"#),
            )),
        );
        assert!(client(http).health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_unhealthy_status_field() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test.local/health",
            MockResponse::Success(Response::new(200, Bytes::from(r#"{"status":"starting"}"#))),
        );
        assert!(!client(http).health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_server_error_is_false() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test.local/health",
            MockResponse::Success(Response::new(503, Bytes::from("down"))),
        );
        assert!(!client(http).health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_connection_error() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test.local/health",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        let result = client(http).health_check().await;
        assert!(matches!(
            result,
            Err(ClientError::Http(HttpError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_health_bad_json() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test.local/health",
            MockResponse::Success(Response::new(200, Bytes::from("ok"))),
        );
        assert!(matches!(
            client(http).health().await,
            Err(ClientError::Json(_))
        ));
    }
}
