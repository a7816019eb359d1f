use crate::chat::ChatPanel;
use crate::docs::DocsNav;
use crate::ingest::IngestPanel;
use crate::view_model::{AppViewModel, ChatView, DocsNavEntry, DocsView, IngestView};
use crate::{
    AccessLevel, ChatOutcome, ChatSession, Effect, RequestId, SectionTop, SelectedFile,
    ServerStatus, TriggerBand, UploadOutcome, DOC_SECTIONS,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    server: ServerStatus,
    chat: ChatPanel,
    ingest: IngestPanel,
    docs: DocsNav,
    contact_sent: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a page whose chat and ingestion panels act on behalf of
    /// `session.user_id`.
    pub fn with_session(session: ChatSession) -> Self {
        Self {
            ingest: IngestPanel::new(session.user_id.clone()),
            chat: ChatPanel::new(session),
            ..Self::default()
        }
    }

    pub fn with_trigger_band(mut self, band: TriggerBand) -> Self {
        self.docs = DocsNav::new(band);
        self
    }

    pub fn session(&self) -> &ChatSession {
        self.chat.session()
    }

    pub fn view(&self) -> AppViewModel {
        let active = self.docs.active();
        AppViewModel {
            server: self.server,
            maintenance: self.server == ServerStatus::Offline,
            chat: ChatView {
                messages: self.chat.messages().to_vec(),
                draft: self.chat.draft().to_string(),
                loading: self.chat.is_loading(),
                send_enabled: self.chat.send_enabled(),
            },
            ingest: IngestView {
                file_name: self.ingest.file().map(|file| file.name.clone()),
                owner_id: self.ingest.owner_id().to_string(),
                owner_editable: self.ingest.access_level() == AccessLevel::Private,
                access_level: self.ingest.access_level(),
                status: self.ingest.status(),
                banner: self.ingest.result().cloned(),
                upload_enabled: self.ingest.upload_enabled(),
            },
            docs: DocsView {
                active: active.to_string(),
                entries: DOC_SECTIONS
                    .iter()
                    .map(|section| DocsNavEntry {
                        id: section.id.to_string(),
                        label: section.label.to_string(),
                        active: section.id == active,
                    })
                    .collect(),
            },
            contact_sent: self.contact_sent,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_server_status(&mut self, status: ServerStatus) {
        if self.server != status {
            self.server = status;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_chat_draft(&mut self, text: String) {
        if self.chat.set_draft(text) {
            self.mark_dirty();
        }
    }

    pub(crate) fn submit_chat(&mut self) -> Option<Effect> {
        let effect = self.chat.submit()?;
        self.mark_dirty();
        Some(effect)
    }

    pub(crate) fn resolve_chat(&mut self, request_id: RequestId, outcome: ChatOutcome) -> Vec<Effect> {
        match self.chat.resolve(request_id, outcome) {
            Some(effects) => {
                self.mark_dirty();
                effects
            }
            None => Vec::new(),
        }
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        if self.ingest.select_file(file) {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_owner_id(&mut self, owner_id: String) {
        if self.ingest.set_owner_id(owner_id) {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_access_level(&mut self, access_level: AccessLevel) {
        if self.ingest.set_access_level(access_level) {
            self.mark_dirty();
        }
    }

    pub(crate) fn start_upload(&mut self) -> Option<Effect> {
        let effect = self.ingest.start_upload()?;
        self.mark_dirty();
        Some(effect)
    }

    pub(crate) fn resolve_upload(&mut self, request_id: RequestId, outcome: UploadOutcome) {
        if self.ingest.resolve(request_id, outcome) {
            self.mark_dirty();
        }
    }

    pub(crate) fn docs_scrolled(&mut self, tops: &[SectionTop]) {
        if self.docs.on_scroll(tops) {
            self.mark_dirty();
        }
    }

    pub(crate) fn docs_nav_clicked(&mut self, id: &str) -> Option<Effect> {
        let effect = self.docs.on_click(id)?;
        self.mark_dirty();
        Some(effect)
    }

    pub(crate) fn set_contact_sent(&mut self, sent: bool) {
        if self.contact_sent != sent {
            self.contact_sent = sent;
            self.mark_dirty();
        }
    }
}
