//! Data models and structures
//!
//! Defines the inbound chat request sent by the frontend and the JSON bodies
//! returned to it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One prior exchange supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conversation_history: Vec<HistoryEntry>,
    /// Data URL, e.g. `data:image/png;base64,...`.
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    /// Caller-supplied species records, embedded verbatim into the prompt.
    #[serde(default)]
    pub species_data: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Parse a raw request body. An empty body is treated as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| Error::InvalidRequest(e.to_string()))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<HistoryEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<HistoryEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
