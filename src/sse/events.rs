//! SSE event types and definitions
//!
//! Contains the StructuredEvent enum with every event the chat endpoint
//! streams, plus the parse error type.

use chrono::NaiveDateTime;

/// Metadata the backend attaches to lifecycle events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventMeta {
    /// Naive ISO-8601 timestamp, as sent on the wire
    pub timestamp: Option<String>,
    /// Backend session the event belongs to
    pub session_id: Option<String>,
}

impl EventMeta {
    /// The timestamp parsed as a naive UTC datetime, if present and well-formed.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        raw.parse::<NaiveDateTime>().ok()
    }
}

/// Typed events from the chat stream
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredEvent {
    /// The agent accepted the message and is working
    AgentStart { meta: EventMeta },
    /// Incremental reply text
    TextChunk {
        data: String,
        /// Whether the backend marked this as a partial (streamed) chunk
        partial: Option<bool>,
    },
    /// Reply finished successfully
    Complete { meta: EventMeta },
    /// Backend reported a failure
    Error { error: String, meta: EventMeta },
    /// Well-formed payload with a `type` this client does not know
    Unknown { event_type: String },
}

impl StructuredEvent {
    /// Returns the wire `type` tag of the event.
    pub fn event_type_name(&self) -> &str {
        match self {
            StructuredEvent::AgentStart { .. } => "agent_start",
            StructuredEvent::TextChunk { .. } => "text_chunk",
            StructuredEvent::Complete { .. } => "complete",
            StructuredEvent::Error { .. } => "error",
            StructuredEvent::Unknown { event_type } => event_type,
        }
    }

    /// One-line summary for diagnostics, including the event metadata.
    pub fn describe(&self) -> String {
        let mut out = self.event_type_name().to_string();
        match self {
            StructuredEvent::TextChunk { data, partial } => {
                out.push_str(&format!(" ({} bytes", data.len()));
                if *partial == Some(true) {
                    out.push_str(", partial");
                }
                out.push(')');
            }
            StructuredEvent::AgentStart { meta }
            | StructuredEvent::Complete { meta }
            | StructuredEvent::Error { meta, .. } => {
                if let Some(session) = &meta.session_id {
                    out.push_str(&format!(" session={}", session));
                }
                if let Some(at) = meta.parsed_timestamp() {
                    out.push_str(&format!(" at={}", at));
                }
            }
            StructuredEvent::Unknown { .. } => {}
        }
        out
    }
}

/// Errors that can occur while turning a frame into an event.
///
/// All of these are recoverable: the frame is dropped and the stream goes on.
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// The joined `data:` payload is not valid JSON
    InvalidJson { payload: String, source: String },
    /// The payload is JSON but carries no string `type` field
    MissingType { payload: String },
    /// A known event type with fields of the wrong shape
    InvalidPayload { event_type: String, source: String },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { source, .. } => {
                write!(f, "Invalid JSON in SSE frame: {}", source)
            }
            SseParseError::MissingType { .. } => {
                write!(f, "SSE payload has no 'type' field")
            }
            SseParseError::InvalidPayload { event_type, source } => {
                write!(f, "Invalid payload for event '{}': {}", event_type, source)
            }
        }
    }
}

impl std::error::Error for SseParseError {}
