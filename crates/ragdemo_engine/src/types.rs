use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type RequestId = u64;

/// JSON body of `POST /api/v1/chat/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvelopeMeta {
    pub http_code: u16,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChatData {
    #[serde(default)]
    pub answer: String,
    /// Kept raw; see [`VisualizationPayload::from_value`].
    #[serde(default)]
    pub visualization: Option<Value>,
}

/// Status envelope around a chat answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatEnvelope {
    pub meta: EnvelopeMeta,
    #[serde(default)]
    pub data: Option<ChatData>,
}

impl ChatEnvelope {
    pub fn is_ok(&self) -> bool {
        self.meta.http_code == 200
    }
}

/// Multipart upload handed to [`crate::RagApi::ingest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub owner_id: String,
    pub access_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct IngestData {
    #[serde(default)]
    pub chunks_count: Option<u64>,
}

/// Response of `POST /api/v1/ingest/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestEnvelope {
    pub code: u32,
    #[serde(default)]
    pub data: Option<IngestData>,
    #[serde(default)]
    pub message: Option<String>,
}

impl IngestEnvelope {
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }

    pub fn chunks_count(&self) -> Option<u64> {
        self.data.as_ref().and_then(|data| data.chunks_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub rag_engine_initialized: Option<bool>,
}

impl HealthReport {
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VizPointPayload {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
}

impl VizPointPayload {
    /// Metadata flattened to display strings, in key order.
    pub fn metadata_pairs(&self) -> Vec<(String, String)> {
        self.metadata
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }
}

/// Projected query and retrieved chunks, as sent by the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualizationPayload {
    pub query_point: Option<VizPointPayload>,
    pub points: Vec<VizPointPayload>,
}

impl VisualizationPayload {
    /// Lenient decoding: malformed points are skipped, and the placeholder
    /// `[0, 0]` query point sent for empty results maps to `None`.
    /// Returns `None` when the payload is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let query_point = object
            .get("query_point")
            .filter(|point| point.is_object())
            .and_then(|point| serde_json::from_value(point.clone()).ok());
        let points = object
            .get("points")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            query_point,
            points,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ChatCompleted {
        request_id: RequestId,
        result: Result<ChatEnvelope, ApiError>,
    },
    UploadCompleted {
        request_id: RequestId,
        result: Result<IngestEnvelope, ApiError>,
    },
    HealthChecked {
        online: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Io,
    /// The request task ended without reporting a result.
    Aborted,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Aborted => write!(f, "request aborted"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
