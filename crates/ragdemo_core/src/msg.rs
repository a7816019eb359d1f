#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the chat input box.
    ChatInputChanged(String),
    /// User pressed send.
    ChatSubmitted,
    /// Engine completion for a chat request.
    ChatResolved {
        request_id: crate::RequestId,
        outcome: crate::ChatOutcome,
    },
    /// User picked a file for ingestion.
    FileSelected(crate::SelectedFile),
    /// User edited the owner id field.
    OwnerIdChanged(String),
    /// User switched between private and common ingestion.
    AccessLevelChanged(crate::AccessLevel),
    /// User clicked the ingest button.
    UploadClicked,
    /// Engine completion for an upload.
    UploadResolved {
        request_id: crate::RequestId,
        outcome: crate::UploadOutcome,
    },
    /// Docs viewport scrolled; carries the measured section tops.
    DocsScrolled(Vec<crate::SectionTop>),
    /// User clicked a docs sidebar entry.
    DocsNavClicked(String),
    /// User submitted the contact form.
    ContactSubmitted(crate::ContactForm),
    /// User started editing the contact form again.
    ContactReset,
    /// Health probe result.
    ServerStatusChanged(crate::ServerStatus),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
