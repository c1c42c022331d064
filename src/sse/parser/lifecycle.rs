//! agent_start, complete and error event parsers

use crate::sse::events::{EventMeta, SseParseError, StructuredEvent};
use crate::sse::payloads::{ErrorPayload, LifecyclePayload};

/// Shown when an error event carries no message.
const UNKNOWN_ERROR: &str = "Unknown error";

fn parse_meta(event_type: &str, value: serde_json::Value) -> Result<EventMeta, SseParseError> {
    let payload: LifecyclePayload =
        serde_json::from_value(value).map_err(|e| SseParseError::InvalidPayload {
            event_type: event_type.to_string(),
            source: e.to_string(),
        })?;
    Ok(payload.into_meta())
}

/// Parse agent_start event
pub(super) fn parse_agent_start_event(
    event_type: &str,
    value: serde_json::Value,
) -> Result<StructuredEvent, SseParseError> {
    Ok(StructuredEvent::AgentStart {
        meta: parse_meta(event_type, value)?,
    })
}

/// Parse complete event
pub(super) fn parse_complete_event(
    event_type: &str,
    value: serde_json::Value,
) -> Result<StructuredEvent, SseParseError> {
    Ok(StructuredEvent::Complete {
        meta: parse_meta(event_type, value)?,
    })
}

/// Parse error event
pub(super) fn parse_error_event(
    event_type: &str,
    value: serde_json::Value,
) -> Result<StructuredEvent, SseParseError> {
    let payload: ErrorPayload =
        serde_json::from_value(value).map_err(|e| SseParseError::InvalidPayload {
            event_type: event_type.to_string(),
            source: e.to_string(),
        })?;

    Ok(StructuredEvent::Error {
        error: payload.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        meta: EventMeta {
            timestamp: payload.timestamp,
            session_id: payload.session_id,
        },
    })
}
