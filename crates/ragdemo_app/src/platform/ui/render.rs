use ragdemo_core::{
    AccessLevel, AppViewModel, ChatMessage, ChatRole, DocsView, ServerStatus, UploadResult,
    UploadStatus,
};

use super::layout::DocsViewport;
use crate::platform::input::HELP;

pub const MAINTENANCE_SCREEN: &[&str] = &[
    "+------------------------------------------------------+",
    "|  The RAG service is currently unavailable.           |",
    "|  Chat and document ingestion are paused until the    |",
    "|  backend answers its health check again.             |",
    "|  Documentation (/docs) and /contact still work.      |",
    "+------------------------------------------------------+",
];

/// Turns successive view models into terminal output, printing only what
/// changed since the previous frame.
#[derive(Debug, Default)]
pub struct Renderer {
    server: Option<ServerStatus>,
    shown_messages: usize,
    loading: bool,
    file_name: Option<String>,
    access: Option<(AccessLevel, String)>,
    upload_status: UploadStatus,
    banner: Option<UploadResult>,
    active_section: Option<String>,
    contact_sent: bool,
}

impl Renderer {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut out = Vec::new();
        self.render_server(view, &mut out);
        self.render_chat(view, &mut out);
        self.render_ingest(view, &mut out);

        if self.active_section.as_deref() != Some(view.docs.active.as_str()) {
            if self.active_section.is_some() {
                if let Some(entry) = view.docs.entries.iter().find(|entry| entry.active) {
                    out.push(format!("[docs] reading: {}", entry.label));
                }
            }
            self.active_section = Some(view.docs.active.clone());
        }

        if view.contact_sent && !self.contact_sent {
            out.push("[contact] Thanks, your message is ready to send.".to_string());
        }
        self.contact_sent = view.contact_sent;
        out
    }

    fn render_server(&mut self, view: &AppViewModel, out: &mut Vec<String>) {
        if self.server == Some(view.server) {
            return;
        }
        let previous = self.server.replace(view.server);
        if view.maintenance {
            out.extend(MAINTENANCE_SCREEN.iter().map(|line| line.to_string()));
        } else if previous.is_some() || view.server != ServerStatus::Unknown {
            out.push(format!("[server] {}", view.server.label()));
        }
    }

    fn render_chat(&mut self, view: &AppViewModel, out: &mut Vec<String>) {
        let messages = &view.chat.messages;
        if messages.len() < self.shown_messages {
            self.shown_messages = 0;
        }
        out.extend(messages[self.shown_messages..].iter().map(chat_line));
        self.shown_messages = messages.len();

        if view.chat.loading && !self.loading {
            out.push("assistant> Thinking...".to_string());
        }
        self.loading = view.chat.loading;
    }

    fn render_ingest(&mut self, view: &AppViewModel, out: &mut Vec<String>) {
        let ingest = &view.ingest;
        if ingest.file_name != self.file_name {
            if let Some(name) = &ingest.file_name {
                out.push(format!("[ingest] selected {name}"));
            }
            self.file_name = ingest.file_name.clone();
        }

        let access = (ingest.access_level, ingest.owner_id.clone());
        if self.access.as_ref() != Some(&access) {
            if self.access.is_some() {
                out.push(if ingest.owner_editable {
                    format!("[ingest] access: private, owner {}", ingest.owner_id)
                } else {
                    "[ingest] access: common".to_string()
                });
            }
            self.access = Some(access);
        }

        if ingest.status == UploadStatus::Uploading && self.upload_status != UploadStatus::Uploading
        {
            out.push(format!(
                "[ingest] Ingesting {}...",
                ingest.file_name.as_deref().unwrap_or("document")
            ));
        }
        self.upload_status = ingest.status;

        if ingest.banner != self.banner {
            if let Some(banner) = &ingest.banner {
                let mark = if banner.success { "ok" } else { "error" };
                out.push(format!("[ingest:{mark}] {}", banner.message));
            }
            self.banner = ingest.banner.clone();
        }
    }
}

fn chat_line(message: &ChatMessage) -> String {
    let prefix = match message.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "assistant",
        ChatRole::Error => "error",
    };
    format!("{prefix}> {}", message.content)
}

/// Sidebar with the active entry marked, followed by the visible text.
pub fn docs_page(docs: &DocsView, viewport: &DocsViewport) -> Vec<String> {
    let mut out = Vec::with_capacity(docs.entries.len() + viewport.visible_lines().len() + 2);
    for entry in &docs.entries {
        let marker = if entry.active { '>' } else { ' ' };
        out.push(format!(" {marker} {:<18} ({})", entry.label, entry.id));
    }
    out.push("-".repeat(60));
    out.extend(viewport.visible_lines().iter().cloned());
    out.push(format!(
        "-- line {} -- {} --",
        viewport.offset() + 1,
        viewport.visible_sections().join(", ")
    ));
    out
}

pub fn help_lines() -> Vec<String> {
    HELP.iter().map(|line| format!("  {line}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ragdemo_core::{update, AppState, ChatOutcome, Msg, SelectedFile, UploadOutcome};

    fn step(state: AppState, msg: Msg) -> AppState {
        update(state, msg).0
    }

    #[test]
    fn first_frame_is_quiet_until_status_known() {
        let mut renderer = Renderer::default();
        assert!(renderer.render(&AppState::new().view()).is_empty());

        let state = step(AppState::new(), Msg::ServerStatusChanged(ServerStatus::Online));
        assert_eq!(renderer.render(&state.view()), vec!["[server] Online & Ready"]);
        assert!(renderer.render(&state.view()).is_empty());
    }

    #[test]
    fn offline_shows_maintenance_screen() {
        let mut renderer = Renderer::default();
        let state = step(AppState::new(), Msg::ServerStatusChanged(ServerStatus::Offline));
        let out = renderer.render(&state.view());
        assert_eq!(out.len(), MAINTENANCE_SCREEN.len());
    }

    #[test]
    fn chat_messages_print_once_with_thinking_indicator() {
        let mut renderer = Renderer::default();
        let mut state = AppState::new();
        renderer.render(&state.view());

        state = step(state, Msg::ChatInputChanged("hello".to_string()));
        state = step(state, Msg::ChatSubmitted);
        assert_eq!(
            renderer.render(&state.view()),
            vec!["you> hello", "assistant> Thinking..."]
        );

        state = step(
            state,
            Msg::ChatResolved {
                request_id: 1,
                outcome: ChatOutcome::Answered {
                    answer: "hi there".to_string(),
                    visualization: None,
                },
            },
        );
        assert_eq!(renderer.render(&state.view()), vec!["assistant> hi there"]);
    }

    #[test]
    fn upload_progress_and_banner() {
        let mut renderer = Renderer::default();
        let mut state = AppState::new();
        renderer.render(&state.view());

        state = step(state, Msg::FileSelected(SelectedFile::from_path("notes.txt")));
        state = step(state, Msg::UploadClicked);
        assert_eq!(
            renderer.render(&state.view()),
            vec!["[ingest] selected notes.txt", "[ingest] Ingesting notes.txt..."]
        );

        state = step(
            state,
            Msg::UploadResolved {
                request_id: 1,
                outcome: UploadOutcome::Ingested {
                    chunks_count: Some(3),
                },
            },
        );
        assert_eq!(
            renderer.render(&state.view()),
            vec!["[ingest:ok] Successfully ingested notes.txt. 3 chunks created."]
        );
    }

    #[test]
    fn docs_page_marks_active_entry() {
        let state = AppState::new();
        let view = state.view();
        let viewport = DocsViewport::new(ragdemo_core::DOC_SECTIONS, 5);
        let page = docs_page(&view.docs, &viewport);
        assert!(page[0].starts_with(" >"));
        assert!(page[1].starts_with("  "));
        assert_eq!(page.len(), view.docs.entries.len() + 5 + 2);
    }
}
