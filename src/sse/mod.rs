//! SSE (Server-Sent Events) stream parser
//!
//! Parses the chat endpoint's `text/event-stream` body. The format consists of:
//! - `data: <json>` - payload lines, joined with `\n` when a frame has several
//! - `event:`, `id:` and `: comment` lines - ignored
//! - Empty line - ends a frame
//!
//! # Module structure
//! - `decoder` - Streaming UTF-8 decoding of transport chunks (ChunkDecoder)
//! - `frames` - Blank-line framing with a retained remainder (FrameSplitter)
//! - `events` - Event type definitions (StructuredEvent, EventMeta, SseParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Frame extraction and the composite SseParser

mod decoder;
mod events;
mod frames;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::ChunkDecoder;
pub use events::{EventMeta, SseParseError, StructuredEvent};
pub use frames::{Frame, FrameSplitter};
pub use parser::{frame_data, parse_event, parse_frame, ParseResult, SseParser};
