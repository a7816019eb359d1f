use crate::{AccessLevel, ChatMessage, ServerStatus, UploadResult, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatView {
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub loading: bool,
    /// Send control state; off while a request is outstanding.
    pub send_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngestView {
    pub file_name: Option<String>,
    pub owner_id: String,
    /// The owner field is only shown for private ingestion.
    pub owner_editable: bool,
    pub access_level: AccessLevel,
    pub status: UploadStatus,
    pub banner: Option<UploadResult>,
    pub upload_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsNavEntry {
    pub id: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocsView {
    pub active: String,
    pub entries: Vec<DocsNavEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub server: ServerStatus,
    /// Backend unreachable; the shell shows the maintenance screen.
    pub maintenance: bool,
    pub chat: ChatView,
    pub ingest: IngestView,
    pub docs: DocsView,
    pub contact_sent: bool,
    pub dirty: bool,
}
