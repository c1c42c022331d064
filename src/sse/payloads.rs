//! SSE payload deserialization structs
//!
//! Internal structs used to deserialize the JSON carried by `data:` lines.
//! Every payload also carries the `type` tag, which serde ignores here.
//! Metadata fields are lenient so an odd timestamp never costs us the event.

use serde::{Deserialize, Deserializer};

use crate::sse::events::EventMeta;

/// Accept a string, stringify any other scalar or object, treat null as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept a bool, ignore anything else.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// agent_start and complete payloads
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LifecyclePayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
}

impl LifecyclePayload {
    pub fn into_meta(self) -> EventMeta {
        EventMeta {
            timestamp: self.timestamp,
            session_id: self.session_id,
        }
    }
}

/// text_chunk payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextChunkPayload {
    pub data: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub partial: Option<bool>,
}

/// error payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
}
