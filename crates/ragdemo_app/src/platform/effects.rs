use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use rag_logging::{rag_debug, rag_info, rag_warn};
use ragdemo_core::{
    ChatOutcome, Effect, Msg, PointKind, ServerStatus, UploadOutcome, Visualization, VizPoint,
};
use ragdemo_engine::{
    ChatRequest, EngineEvent, EngineHandle, UploadJob, VisualizationPayload, VizPointPayload,
};

use super::app::AppEvent;
use super::ui::layout::DocsViewport;
use super::visualization::VisualizationPane;

const PUMP_POLL: Duration = Duration::from_millis(50);
const MISSING_DATA: &str = "successful envelope without data";

/// Carries out core effects against the engine and the local views.
pub struct EffectRunner {
    engine: EngineHandle,
    pub visualization: VisualizationPane,
    pub viewport: DocsViewport,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, viewport: DocsViewport) -> Self {
        Self {
            engine,
            visualization: VisualizationPane::default(),
            viewport,
        }
    }

    /// Runs `effects` in order and returns lines to show the user.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::SendChat {
                    request_id,
                    query,
                    session_id,
                    user_id,
                    options,
                } => {
                    rag_info!("SendChat request_id={} query_len={}", request_id, query.len());
                    self.engine.send_chat(
                        request_id,
                        ChatRequest {
                            query,
                            session_id,
                            user_id,
                            system_prompt: options.system_prompt,
                            temperature: options.temperature,
                        },
                    );
                }
                Effect::UploadDocument {
                    request_id,
                    file,
                    owner_id,
                    access_level,
                } => {
                    rag_info!(
                        "UploadDocument request_id={} file={} access_level={}",
                        request_id,
                        file.name,
                        access_level
                    );
                    self.engine.upload(
                        request_id,
                        UploadJob {
                            path: file.path,
                            file_name: file.name,
                            owner_id,
                            access_level: access_level.as_str().to_string(),
                        },
                    );
                }
                Effect::ForwardVisualization(visualization) => {
                    rag_debug!(
                        "Visualization received points={}",
                        visualization.points.len()
                    );
                    self.visualization.receive(visualization);
                    notices.push("(retrieval visualization updated; /viz to view)".to_string());
                }
                Effect::ScrollToSection { section_id, smooth } => {
                    rag_debug!("ScrollToSection {} smooth={}", section_id, smooth);
                    if !self.viewport.scroll_to(&section_id) {
                        rag_warn!("ScrollToSection for unknown section {}", section_id);
                    }
                }
                Effect::OpenMailto { link } => {
                    rag_info!("Contact mailto link built ({} bytes)", link.len());
                    notices.push("Open this link in your mail client:".to_string());
                    notices.push(link);
                }
            }
        }
        notices
    }
}

/// Forwards engine completions into the app event channel until either
/// side hangs up.
pub fn spawn_event_pump(engine: EngineHandle, tx: mpsc::Sender<AppEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("ragdemo-event-pump".to_string())
        .spawn(move || pump_events(|| engine.recv_timeout(PUMP_POLL), &tx))?;
    Ok(())
}

fn pump_events(
    mut recv: impl FnMut() -> Result<EngineEvent, RecvTimeoutError>,
    tx: &mpsc::Sender<AppEvent>,
) {
    loop {
        match recv() {
            Ok(event) => {
                if tx.send(AppEvent::Msg(translate(event))).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                rag_warn!("Engine event channel closed; stopping event pump");
                break;
            }
        }
    }
}

pub fn translate(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ChatCompleted { request_id, result } => {
            let outcome = match result {
                Ok(envelope) if envelope.is_ok() => match envelope.data {
                    Some(data) => ChatOutcome::Answered {
                        answer: data.answer,
                        visualization: data
                            .visualization
                            .as_ref()
                            .and_then(VisualizationPayload::from_value)
                            .map(to_visualization),
                    },
                    None => ChatOutcome::Failed {
                        reason: MISSING_DATA.to_string(),
                    },
                },
                Ok(envelope) => ChatOutcome::Rejected {
                    http_code: envelope.meta.http_code,
                },
                Err(err) => ChatOutcome::Failed {
                    reason: err.to_string(),
                },
            };
            Msg::ChatResolved {
                request_id,
                outcome,
            }
        }
        EngineEvent::UploadCompleted { request_id, result } => {
            let outcome = match result {
                Ok(envelope) if envelope.is_ok() => match envelope.data {
                    Some(data) => UploadOutcome::Ingested {
                        chunks_count: data.chunks_count,
                    },
                    None => UploadOutcome::Failed {
                        reason: MISSING_DATA.to_string(),
                    },
                },
                Ok(envelope) => UploadOutcome::Rejected {
                    code: envelope.code,
                    message: envelope.message,
                },
                Err(err) => UploadOutcome::Failed {
                    reason: err.to_string(),
                },
            };
            Msg::UploadResolved {
                request_id,
                outcome,
            }
        }
        EngineEvent::HealthChecked { online } => Msg::ServerStatusChanged(if online {
            ServerStatus::Online
        } else {
            ServerStatus::Offline
        }),
    }
}

fn to_visualization(payload: VisualizationPayload) -> Visualization {
    Visualization {
        query_point: payload.query_point.map(to_point),
        points: payload.points.into_iter().map(to_point).collect(),
    }
}

fn to_point(payload: VizPointPayload) -> VizPoint {
    VizPoint {
        metadata: payload.metadata_pairs(),
        x: payload.x,
        y: payload.y,
        z: payload.z,
        kind: PointKind::from_wire(&payload.kind),
        text: payload.text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ragdemo_engine::{ChatData, ChatEnvelope, EnvelopeMeta, IngestData, IngestEnvelope};
    use serde_json::json;

    fn chat_envelope(http_code: u16, data: Option<ChatData>) -> ChatEnvelope {
        ChatEnvelope {
            meta: EnvelopeMeta {
                http_code,
                message: None,
            },
            data,
        }
    }

    #[test]
    fn answered_chat_carries_visualization() {
        let data = ChatData {
            answer: "Paris".to_string(),
            visualization: Some(json!({
                "query_point": {"x": 0.1, "y": 0.2, "z": 0.3, "type": "query", "text": "capital?"},
                "points": [
                    {"x": 1.0, "y": 2.0, "z": 3.0, "type": "doc", "text": "Paris is...",
                     "metadata": {"source": "atlas.pdf", "page": 4}}
                ]
            })),
        };
        let msg = translate(EngineEvent::ChatCompleted {
            request_id: 3,
            result: Ok(chat_envelope(200, Some(data))),
        });

        let Msg::ChatResolved {
            request_id,
            outcome: ChatOutcome::Answered {
                answer,
                visualization: Some(viz),
            },
        } = msg
        else {
            panic!("unexpected msg {msg:?}");
        };
        assert_eq!(request_id, 3);
        assert_eq!(answer, "Paris");
        assert_eq!(viz.query_point.map(|p| p.kind), Some(PointKind::Query));
        assert_eq!(viz.points[0].kind, PointKind::Doc);
        let metadata = &viz.points[0].metadata;
        assert!(metadata.contains(&("source".to_string(), "atlas.pdf".to_string())));
        assert!(metadata.contains(&("page".to_string(), "4".to_string())));
    }

    #[test]
    fn non_ok_envelope_is_rejected() {
        let msg = translate(EngineEvent::ChatCompleted {
            request_id: 1,
            result: Ok(chat_envelope(500, None)),
        });
        assert_eq!(
            msg,
            Msg::ChatResolved {
                request_id: 1,
                outcome: ChatOutcome::Rejected { http_code: 500 },
            }
        );
    }

    #[test]
    fn ok_envelope_without_data_is_a_failure() {
        let chat = translate(EngineEvent::ChatCompleted {
            request_id: 1,
            result: Ok(chat_envelope(200, None)),
        });
        assert!(matches!(
            chat,
            Msg::ChatResolved {
                request_id: 1,
                outcome: ChatOutcome::Failed { .. },
            }
        ));

        let upload = translate(EngineEvent::UploadCompleted {
            request_id: 2,
            result: Ok(IngestEnvelope {
                code: 200,
                data: None,
                message: None,
            }),
        });
        assert!(matches!(
            upload,
            Msg::UploadResolved {
                request_id: 2,
                outcome: UploadOutcome::Failed { .. },
            }
        ));
    }

    #[test]
    fn pump_forwards_events_and_stops_on_disconnect() {
        let (tx, rx) = mpsc::channel();
        let mut script = vec![
            Err(RecvTimeoutError::Disconnected),
            Ok(EngineEvent::HealthChecked { online: true }),
            Err(RecvTimeoutError::Timeout),
        ];
        pump_events(|| script.pop().unwrap_or(Err(RecvTimeoutError::Disconnected)), &tx);

        let forwarded: Vec<AppEvent> = rx.try_iter().collect();
        assert_eq!(forwarded.len(), 1);
        assert!(matches!(
            &forwarded[0],
            AppEvent::Msg(Msg::ServerStatusChanged(ServerStatus::Online))
        ));
        assert!(script.is_empty());
    }

    #[test]
    fn upload_envelopes_map_to_outcomes() {
        let ok = translate(EngineEvent::UploadCompleted {
            request_id: 2,
            result: Ok(IngestEnvelope {
                code: 200,
                data: Some(IngestData {
                    chunks_count: Some(12),
                }),
                message: None,
            }),
        });
        assert_eq!(
            ok,
            Msg::UploadResolved {
                request_id: 2,
                outcome: UploadOutcome::Ingested {
                    chunks_count: Some(12)
                },
            }
        );

        let rejected = translate(EngineEvent::UploadCompleted {
            request_id: 3,
            result: Ok(IngestEnvelope {
                code: 415,
                data: None,
                message: Some("Unsupported file type".to_string()),
            }),
        });
        assert_eq!(
            rejected,
            Msg::UploadResolved {
                request_id: 3,
                outcome: UploadOutcome::Rejected {
                    code: 415,
                    message: Some("Unsupported file type".to_string()),
                },
            }
        );
    }

    #[test]
    fn health_maps_to_status() {
        assert_eq!(
            translate(EngineEvent::HealthChecked { online: false }),
            Msg::ServerStatusChanged(ServerStatus::Offline)
        );
        assert_eq!(
            translate(EngineEvent::HealthChecked { online: true }),
            Msg::ServerStatusChanged(ServerStatus::Online)
        );
    }
}
