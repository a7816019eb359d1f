//! RAG demo engine: HTTP client for the RAG API and effect execution.
mod api;
mod engine;
mod types;

pub use api::{ClientSettings, RagApi, ReqwestRagApi};
pub use engine::{EngineError, EngineHandle, UploadJob};
pub use types::{
    ApiError, ChatData, ChatEnvelope, ChatRequest, EngineEvent, EnvelopeMeta, FailureKind,
    HealthReport, IngestData, IngestEnvelope, IngestionRequest, RequestId, VisualizationPayload,
    VizPointPayload,
};
