//! RAG demo core: pure state machine and view-model helpers for the chat,
//! ingestion and documentation panels.
mod chat;
mod contact;
mod docs;
mod effect;
mod ingest;
mod msg;
mod server;
mod state;
mod update;
mod view_model;
mod visualization;

pub use chat::{
    ChatMessage, ChatOptions, ChatOutcome, ChatRole, ChatSession, RequestId,
    CHAT_NETWORK_ERROR_TEXT, CHAT_REJECTED_TEXT, DEFAULT_USER_ID,
};
pub use contact::{encode_uri_component, mailto_link, ContactForm};
pub use docs::{find_section, DocSection, SectionTop, TriggerBand, DOC_SECTIONS};
pub use effect::Effect;
pub use ingest::{
    AccessLevel, SelectedFile, UploadOutcome, UploadResult, UploadStatus, UPLOAD_FAILED_TEXT,
    UPLOAD_NETWORK_ERROR_TEXT,
};
pub use msg::Msg;
pub use server::ServerStatus;
pub use state::AppState;
pub use update::{update, update_with_recipient};
pub use view_model::{AppViewModel, ChatView, DocsNavEntry, DocsView, IngestView};
pub use visualization::{PointKind, Visualization, VizPoint};
