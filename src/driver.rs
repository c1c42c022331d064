//! Stream driver: one chat request from POST to terminal state.
//!
//! Feeds transport chunks through the [`SseParser`] and applies every event
//! to a [`ReplyRenderer`] in arrival order. Transport failures end the reply
//! in `Terminal(Errored)`; malformed frames are dropped and counted.

use futures_util::StreamExt;

use crate::models::ChatRequest;
use crate::reply::{PendingReply, ReplyRenderer, ReplyState, Terminal};
use crate::sse::{ParseResult, SseParser};
use crate::traits::{Headers, HttpClient, ReplyView};

/// How a stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// A `complete` event was applied
    Completed,
    /// An `error` event or a transport failure ended the reply
    Errored,
    /// The body ended before any terminal event
    Truncated,
}

impl StreamOutcome {
    fn from_state(state: ReplyState) -> Self {
        match state {
            ReplyState::Terminal(Terminal::Complete) => StreamOutcome::Completed,
            ReplyState::Terminal(Terminal::Errored) => StreamOutcome::Errored,
            _ => StreamOutcome::Truncated,
        }
    }
}

/// Summary of one driven stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    pub outcome: StreamOutcome,
    /// The reply as the renderer left it
    pub reply: PendingReply,
    /// Events that caused a state transition
    pub events_applied: usize,
    /// Frames dropped because their payload was malformed
    pub frames_dropped: usize,
}

impl StreamReport {
    pub fn is_errored(&self) -> bool {
        self.outcome == StreamOutcome::Errored
    }
}

/// Headers sent with every chat POST.
pub fn stream_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers
}

/// Drives a single request through an [`HttpClient`].
pub struct StreamDriver<'a, C: HttpClient + ?Sized> {
    http: &'a C,
    url: &'a str,
}

impl<'a, C: HttpClient + ?Sized> StreamDriver<'a, C> {
    pub fn new(http: &'a C, url: &'a str) -> Self {
        Self { http, url }
    }

    /// POST `request` and render the streamed reply into `view`.
    ///
    /// Never returns an error: every failure is rendered into the view and
    /// reflected in the report's outcome.
    pub async fn run<V: ReplyView>(&self, request: &ChatRequest, view: V) -> StreamReport {
        let mut renderer = ReplyRenderer::new(view);
        let mut tally = Tally::default();

        renderer.begin();

        let body = match serde_json::to_string(request) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to serialize chat request: {}", e);
                renderer.fail(&e.to_string());
                return tally.into_report(renderer);
            }
        };

        tracing::info!("POST {} ({} bytes)", self.url, body.len());

        let mut stream = match self.http.post_stream(self.url, &body, &stream_headers()).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::info!("Chat request failed: {}", e);
                renderer.fail(&e.to_string());
                return tally.into_report(renderer);
            }
        };

        let mut parser = SseParser::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    tracing::debug!("Received {} byte chunk", bytes.len());
                    let results = parser.feed(&bytes);
                    tally.apply_all(&mut renderer, results);
                    if renderer.is_terminal() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::info!("Stream read failed: {}", e);
                    renderer.fail(&e.to_string());
                    break;
                }
            }
        }

        if !renderer.is_terminal() {
            let results = parser.finish();
            tally.apply_all(&mut renderer, results);
        }

        if !renderer.is_terminal() {
            tracing::info!(
                "Stream ended without a terminal event; reply left {}",
                renderer.reply().state.as_str()
            );
        }

        let report = tally.into_report(renderer);
        tracing::info!(
            "Stream finished: {:?}, {} events applied, {} frames dropped",
            report.outcome,
            report.events_applied,
            report.frames_dropped
        );
        report
    }
}

#[derive(Debug, Default)]
struct Tally {
    applied: usize,
    dropped: usize,
}

impl Tally {
    fn apply_all<V: ReplyView>(&mut self, renderer: &mut ReplyRenderer<V>, results: Vec<ParseResult>) {
        for result in results {
            match result {
                Ok(event) => {
                    if renderer.apply(&event).is_applied() {
                        self.applied += 1;
                    }
                }
                Err(e) => {
                    tracing::debug!("Dropping malformed SSE frame: {}", e);
                    self.dropped += 1;
                }
            }
        }
    }

    fn into_report<V: ReplyView>(self, renderer: ReplyRenderer<V>) -> StreamReport {
        let (reply, _view) = renderer.into_parts();
        StreamReport {
            outcome: StreamOutcome::from_state(reply.state),
            reply,
            events_applied: self.applied,
            frames_dropped: self.dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse, RecordingView, ViewCall};
    use crate::traits::HttpError;
    use bytes::Bytes;
    use std::io;
    use std::sync::{Arc, Mutex};

    const URL: &str = "http://test.local/api/chat";

    fn client_with(response: MockResponse) -> MockHttpClient {
        let client = MockHttpClient::new();
        client.set_response(URL, response);
        client
    }

    fn chunks(parts: &[&str]) -> Vec<Bytes> {
        parts.iter().map(|p| Bytes::from(p.to_string())).collect()
    }

    #[tokio::test]
    async fn test_complete_stream() {
        let http = client_with(MockResponse::Stream(chunks(&[
            "data: {\"type\":\"agent_start\"}\n\n",
            "data: {\"type\":\"text_chunk\",\"data\":\"Hel\"}\n\n",
            "data: {\"type\":\"text_chunk\",\"data\":\"lo\"}\n\ndata: {\"type\":\"complete\"}\n\n",
        ])));
        let mut view = RecordingView::new();

        let report = StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hi"), &mut view)
            .await;

        assert_eq!(report.outcome, StreamOutcome::Completed);
        assert_eq!(report.reply.content, "Hello");
        assert_eq!(report.events_applied, 4);
        assert_eq!(report.frames_dropped, 0);
        assert_eq!(view.text, "Hello");
        assert!(!view.working);
        assert!(!view.marker);
    }

    #[tokio::test]
    async fn test_sends_json_body_and_headers() {
        let http = client_with(MockResponse::Stream(chunks(&[
            "data: {\"type\":\"complete\"}\n\n",
        ])));
        let mut view = RecordingView::new();

        StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hello there"), &mut view)
            .await;

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"message":"Hello there"}"#));
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let http = client_with(MockResponse::Error(HttpError::ServerError {
            status: 500,
            message: "Internal Server Error".to_string(),
        }));
        let mut view = RecordingView::new();

        let report = StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hi"), &mut view)
            .await;

        assert_eq!(report.outcome, StreamOutcome::Errored);
        assert_eq!(
            report.reply.error.as_deref(),
            Some("HTTP 500: Internal Server Error")
        );
        assert!(!view.working);
    }

    #[tokio::test]
    async fn test_stream_failure_mid_reply() {
        let http = client_with(MockResponse::StreamFailure {
            chunks: chunks(&["data: {\"type\":\"text_chunk\",\"data\":\"par\"}\n\n"]),
            error: HttpError::Io("connection reset".to_string()),
        });
        let mut view = RecordingView::new();

        let report = StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hi"), &mut view)
            .await;

        assert_eq!(report.outcome, StreamOutcome::Errored);
        assert_eq!(report.reply.content, "par");
        assert_eq!(view.error.as_deref(), Some("Stream read failed: connection reset"));
        assert!(!view.marker);
    }

    #[tokio::test]
    async fn test_truncated_stream_leaves_reply() {
        let http = client_with(MockResponse::Stream(chunks(&[
            "data: {\"type\":\"text_chunk\",\"data\":\"half\"}\n\n",
            "data: {\"type\":\"complete\"}",
        ])));
        let mut view = RecordingView::new();

        let report = StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hi"), &mut view)
            .await;

        assert_eq!(report.outcome, StreamOutcome::Truncated);
        assert_eq!(report.reply.state, ReplyState::Streaming);
        assert_eq!(view.text, "half");
        assert!(view.marker);
        assert!(!view.completed);
    }

    #[tokio::test]
    async fn test_malformed_frame_is_counted() {
        let http = client_with(MockResponse::Stream(chunks(&[
            "data: {not json}\n\n",
            "data: {\"type\":\"text_chunk\",\"data\":\"ok\"}\n\n",
            "data: {\"type\":\"complete\"}\n\n",
        ])));
        let mut view = RecordingView::new();

        let report = StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hi"), &mut view)
            .await;

        assert_eq!(report.outcome, StreamOutcome::Completed);
        assert_eq!(report.frames_dropped, 1);
        assert_eq!(report.reply.content, "ok");
    }

    #[tokio::test]
    async fn test_stops_reading_after_terminal() {
        let http = client_with(MockResponse::StreamFailure {
            chunks: chunks(&["data: {\"type\":\"complete\"}\n\n"]),
            error: HttpError::Io("late failure".to_string()),
        });
        let mut view = RecordingView::new();

        let report = StreamDriver::new(&http, URL)
            .run(&ChatRequest::new("Hi"), &mut view)
            .await;

        assert_eq!(report.outcome, StreamOutcome::Completed);
        assert_eq!(view.error, None);
        assert!(!view
            .calls
            .iter()
            .any(|c| matches!(c, ViewCall::MarkAsError(_))));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_diagnostics_stay_below_warn() {
        let http = client_with(MockResponse::Stream(chunks(&[
            "data: {not json}\n\n",
            "data: {\"type\":\"text_chunk\",\"data\":\"half\"}\n\n",
        ])));
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let report = tracing::subscriber::with_default(subscriber, || {
            runtime.block_on(async {
                let mut view = RecordingView::new();
                StreamDriver::new(&http, URL)
                    .run(&ChatRequest::new("Hi"), &mut view)
                    .await
            })
        });

        assert_eq!(report.outcome, StreamOutcome::Truncated);
        assert_eq!(report.frames_dropped, 1);
        let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logged, "");
    }

    #[test]
    fn test_is_errored() {
        let report = StreamReport {
            outcome: StreamOutcome::Errored,
            reply: PendingReply::new(),
            events_applied: 0,
            frames_dropped: 0,
        };
        assert!(report.is_errored());
    }
}
