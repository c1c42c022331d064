//! SSE body fixtures and chunking helpers.

use bytes::Bytes;

/// One SSE frame carrying `json` as its only data line.
pub fn frame(json: &str) -> String {
    format!("data: {}\n\n", json)
}

/// `text_chunk` frame for `text`.
pub fn text_frame(text: &str) -> String {
    frame(&serde_json::json!({ "type": "text_chunk", "data": text }).to_string())
}

/// The canonical streamed "Hello" reply, with an ignored `event:` line.
pub fn hello_body() -> String {
    [
        "event: x\n".to_string(),
        frame(r#"{"type":"agent_start"}"#),
        text_frame("Hel"),
        text_frame("lo"),
        frame(r#"{"type":"complete"}"#),
    ]
    .concat()
}

/// A longer reply with multibyte text, metadata fields and a comment line.
pub fn rich_body() -> String {
    [
        frame(r#"{"type":"agent_start","timestamp":"2024-05-01T12:00:00.123456","session_id":"s-1"}"#),
        ": keep-alive\n\n".to_string(),
        text_frame("Grüße, "),
        text_frame("世界 "),
        text_frame("🦀!"),
        frame(r#"{"type":"complete","timestamp":"2024-05-01T12:00:01","session_id":"s-1"}"#),
    ]
    .concat()
}

/// Split `body` into two chunks at byte `at`.
pub fn split_at(body: &[u8], at: usize) -> Vec<Bytes> {
    vec![
        Bytes::copy_from_slice(&body[..at]),
        Bytes::copy_from_slice(&body[at..]),
    ]
}

/// Split `body` into chunks of `size` bytes (the last may be shorter).
pub fn chunks_of(body: &[u8], size: usize) -> Vec<Bytes> {
    body.chunks(size.max(1)).map(Bytes::copy_from_slice).collect()
}

/// The body as a single chunk.
pub fn whole(body: &str) -> Vec<Bytes> {
    vec![Bytes::from(body.to_string())]
}
