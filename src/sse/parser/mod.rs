//! SSE stream parsing logic
//!
//! Contains the stateful SseParser that turns raw transport chunks into
//! events, as well as the per-frame extraction functions.

mod content;
mod lifecycle;

use crate::sse::decoder::ChunkDecoder;
use crate::sse::events::{SseParseError, StructuredEvent};
use crate::sse::frames::{Frame, FrameSplitter};

use content::parse_text_chunk_event;
use lifecycle::{parse_agent_start_event, parse_complete_event, parse_error_event};

/// Outcome of extracting one frame: an event, or a recoverable parse error.
pub type ParseResult = Result<StructuredEvent, SseParseError>;

/// Join the frame's `data:` lines with `\n`.
///
/// Returns `None` when the frame has no `data:` line at all. Any other field
/// (`event:`, `id:`, comments) is ignored.
pub fn frame_data(frame: &Frame) -> Option<String> {
    let mut data_lines = Vec::new();
    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.trim_start());
        }
    }

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

/// Parse a joined data payload into a typed event.
pub fn parse_event(data: &str) -> ParseResult {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
            payload: data.to_string(),
            source: e.to_string(),
        })?;

    let event_type = match value.get("type").and_then(|t| t.as_str()) {
        Some(t) => t.to_string(),
        None => {
            return Err(SseParseError::MissingType {
                payload: data.to_string(),
            })
        }
    };

    match event_type.as_str() {
        "agent_start" => parse_agent_start_event(&event_type, value),
        "text_chunk" => parse_text_chunk_event(&event_type, value),
        "complete" => parse_complete_event(&event_type, value),
        "error" => parse_error_event(&event_type, value),
        _ => Ok(StructuredEvent::Unknown { event_type }),
    }
}

/// Parse one frame. `Ok(None)` means the frame carried no payload.
pub fn parse_frame(frame: &Frame) -> Result<Option<StructuredEvent>, SseParseError> {
    match frame_data(frame) {
        Some(data) => parse_event(&data).map(Some),
        None => Ok(None),
    }
}

/// Stateful parser from raw bytes to events.
///
/// Owns the decoder and the frame splitter so that the residual state of an
/// interrupted read lives here, not in the read loop.
#[derive(Debug, Default)]
pub struct SseParser {
    decoder: ChunkDecoder,
    splitter: FrameSplitter,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk, returning every event it completes in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ParseResult> {
        let text = self.decoder.decode(chunk, false);
        self.extract(&text)
    }

    /// Signal end of stream.
    ///
    /// Flushes the decoder and emits any frame the flush completes. A
    /// trailing fragment never closed by a blank line is discarded.
    pub fn finish(&mut self) -> Vec<ParseResult> {
        let text = self.decoder.decode(&[], true);
        let results = self.extract(&text);

        let leftover = self.splitter.take_remainder();
        if !leftover.trim().is_empty() {
            tracing::debug!(
                "Discarding unterminated SSE fragment at end of stream ({} bytes)",
                leftover.len()
            );
        }

        results
    }

    /// Text buffered but not yet resolved into a frame.
    pub fn buffered(&self) -> &str {
        self.splitter.remainder()
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.splitter.reset();
    }

    fn extract(&mut self, text: &str) -> Vec<ParseResult> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for frame in self.splitter.feed(text) {
            match parse_frame(&frame) {
                Ok(Some(event)) => {
                    tracing::debug!("SSE event: {}", event.describe());
                    results.push(Ok(event));
                }
                Ok(None) => {
                    tracing::debug!("SSE frame without data lines skipped");
                }
                Err(e) => results.push(Err(e)),
            }
        }
        results
    }
}
