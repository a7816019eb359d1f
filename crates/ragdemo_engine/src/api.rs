use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::{ApiError, ChatEnvelope, ChatRequest, FailureKind, HealthReport, IngestEnvelope, IngestionRequest};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub chat_path: String,
    pub upload_path: String,
    pub health_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            chat_path: "/api/v1/chat/chat".to_string(),
            upload_path: "/api/v1/ingest/upload".to_string(),
            health_path: "/health".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// The two calls this client makes against the RAG backend, plus the
/// availability probe.
#[async_trait::async_trait]
pub trait RagApi: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatEnvelope, ApiError>;

    async fn ingest(&self, request: IngestionRequest) -> Result<IngestEnvelope, ApiError>;

    async fn health(&self) -> Result<HealthReport, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRagApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestRagApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        reqwest::Url::parse(&format!("{base}/{path}"))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl RagApi for ReqwestRagApi {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatEnvelope, ApiError> {
        let url = self.endpoint(&self.settings.chat_path)?;
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn ingest(&self, request: IngestionRequest) -> Result<IngestEnvelope, ApiError> {
        let url = self.endpoint(&self.settings.upload_path)?;
        let mime = mime_guess::from_path(&request.file_name).first_or_octet_stream();
        let file_part = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(mime.essence_str())
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        let form = Form::new()
            .part("file", file_part)
            .text("user_id", request.owner_id)
            .text("access_level", request.access_level);

        self.send_json(self.client.post(url).multipart(form)).await
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        let url = self.endpoint(&self.settings.health_path)?;
        self.send_json(self.client.get(url)).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
