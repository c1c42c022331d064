//! text_chunk event parser

use crate::sse::events::{SseParseError, StructuredEvent};
use crate::sse::payloads::TextChunkPayload;

/// Parse a text_chunk event
pub(super) fn parse_text_chunk_event(
    event_type: &str,
    value: serde_json::Value,
) -> Result<StructuredEvent, SseParseError> {
    let payload: TextChunkPayload =
        serde_json::from_value(value).map_err(|e| SseParseError::InvalidPayload {
            event_type: event_type.to_string(),
            source: e.to_string(),
        })?;

    Ok(StructuredEvent::TextChunk {
        data: payload.data,
        partial: payload.partial,
    })
}
