use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rag_logging::{rag_debug, rag_info, rag_warn};
use tokio_util::sync::CancellationToken;

use crate::api::{ClientSettings, RagApi, ReqwestRagApi};
use crate::{ApiError, ChatRequest, EngineEvent, FailureKind, IngestionRequest, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
}

/// A file to read from disk and push to the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub path: PathBuf,
    pub file_name: String,
    pub owner_id: String,
    pub access_level: String,
}

enum EngineCommand {
    Chat {
        request_id: RequestId,
        request: ChatRequest,
    },
    Upload {
        request_id: RequestId,
        job: UploadJob,
    },
    CheckHealth,
    MonitorHealth {
        interval: Duration,
        cancel: CancellationToken,
    },
}

/// Owns the engine thread. Every accepted chat or upload command produces
/// exactly one completion event. Clones share both channels; each event is
/// delivered to exactly one receiver.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        rag_info!("Engine targeting {}", settings.base_url);
        let api = ReqwestRagApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    /// Runs commands against any [`RagApi`] implementation.
    pub fn with_api(api: Arc<dyn RagApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("ragdemo-engine-worker")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("ragdemo-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
                rag_debug!("Engine command channel closed; shutting down runtime");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn send_chat(&self, request_id: RequestId, request: ChatRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Chat {
            request_id,
            request,
        });
    }

    pub fn upload(&self, request_id: RequestId, job: UploadJob) {
        let _ = self.cmd_tx.send(EngineCommand::Upload { request_id, job });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    /// Probes health now and then every `interval` until `cancel` fires.
    pub fn monitor_health(&self, interval: Duration, cancel: CancellationToken) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::MonitorHealth { interval, cancel });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for an event. A poisoned receiver reports
    /// `Disconnected`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        self.event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?
            .recv_timeout(timeout)
    }
}

/// Sends `fallback` on drop unless [`CompletionGuard::complete`] ran first,
/// so a panicking or cancelled task still reports.
struct CompletionGuard {
    event_tx: mpsc::Sender<EngineEvent>,
    fallback: Option<EngineEvent>,
}

impl CompletionGuard {
    fn new(event_tx: mpsc::Sender<EngineEvent>, fallback: EngineEvent) -> Self {
        Self {
            event_tx,
            fallback: Some(fallback),
        }
    }

    fn complete(mut self, event: EngineEvent) {
        self.fallback = None;
        let _ = self.event_tx.send(event);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            rag_warn!("Engine task ended without a result; reporting abort");
            let _ = self.event_tx.send(event);
        }
    }
}

fn aborted() -> ApiError {
    ApiError::new(FailureKind::Aborted, "request task ended unexpectedly")
}

async fn handle_command(
    api: &dyn RagApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Chat {
            request_id,
            request,
        } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::ChatCompleted {
                    request_id,
                    result: Err(aborted()),
                },
            );
            rag_debug!(
                "Chat request_id={} session={} query_len={}",
                request_id,
                request.session_id,
                request.query.len()
            );
            let result = api.chat(&request).await;
            match &result {
                Ok(envelope) if !envelope.is_ok() => rag_warn!(
                    "Chat request {} rejected with http_code={}",
                    request_id,
                    envelope.meta.http_code
                ),
                Ok(_) => {}
                Err(err) => rag_warn!("Chat request {} failed: {}", request_id, err),
            }
            guard.complete(EngineEvent::ChatCompleted { request_id, result });
        }
        EngineCommand::Upload { request_id, job } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::UploadCompleted {
                    request_id,
                    result: Err(aborted()),
                },
            );
            let result = upload(api, job).await;
            match &result {
                Ok(envelope) if !envelope.is_ok() => rag_warn!(
                    "Upload {} rejected with code={} message={:?}",
                    request_id,
                    envelope.code,
                    envelope.message
                ),
                Ok(envelope) => rag_info!(
                    "Upload {} ingested chunks={:?}",
                    request_id,
                    envelope.chunks_count()
                ),
                Err(err) => rag_warn!("Upload {} failed: {}", request_id, err),
            }
            guard.complete(EngineEvent::UploadCompleted { request_id, result });
        }
        EngineCommand::CheckHealth => {
            let online = probe(api).await;
            let _ = event_tx.send(EngineEvent::HealthChecked { online });
        }
        EngineCommand::MonitorHealth { interval, cancel } => loop {
            let online = probe(api).await;
            if event_tx.send(EngineEvent::HealthChecked { online }).is_err() {
                break;
            }
            tokio::select! {
                _ = cancel.cancelled() => {
                    rag_debug!("Health monitor cancelled");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        },
    }
}

async fn upload(api: &dyn RagApi, job: UploadJob) -> Result<crate::IngestEnvelope, ApiError> {
    let bytes = tokio::fs::read(&job.path).await.map_err(|err| {
        ApiError::new(
            FailureKind::Io,
            format!("reading {}: {}", job.path.display(), err),
        )
    })?;
    rag_debug!(
        "Uploading {} ({} bytes) access_level={}",
        job.file_name,
        bytes.len(),
        job.access_level
    );
    api.ingest(IngestionRequest {
        file_name: job.file_name,
        bytes,
        owner_id: job.owner_id,
        access_level: job.access_level,
    })
    .await
}

async fn probe(api: &dyn RagApi) -> bool {
    match api.health().await {
        Ok(report) => report.is_online(),
        Err(err) => {
            rag_debug!("Health probe failed: {}", err);
            false
        }
    }
}
