use crate::{mailto_link, AppState, Effect, Msg};

/// Recipient used when the shell does not configure one.
const DEFAULT_CONTACT_RECIPIENT: &str = "contact@example.com";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    update_with_recipient(state, msg, DEFAULT_CONTACT_RECIPIENT)
}

/// Same as [`update`], addressing contact mails to `recipient`.
pub fn update_with_recipient(
    mut state: AppState,
    msg: Msg,
    recipient: &str,
) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ChatInputChanged(text) => {
            state.set_chat_draft(text);
            Vec::new()
        }
        Msg::ChatSubmitted => state.submit_chat().into_iter().collect(),
        Msg::ChatResolved {
            request_id,
            outcome,
        } => state.resolve_chat(request_id, outcome),
        Msg::FileSelected(file) => {
            state.select_file(file);
            Vec::new()
        }
        Msg::OwnerIdChanged(owner_id) => {
            state.set_owner_id(owner_id);
            Vec::new()
        }
        Msg::AccessLevelChanged(access_level) => {
            state.set_access_level(access_level);
            Vec::new()
        }
        Msg::UploadClicked => state.start_upload().into_iter().collect(),
        Msg::UploadResolved {
            request_id,
            outcome,
        } => {
            state.resolve_upload(request_id, outcome);
            Vec::new()
        }
        Msg::DocsScrolled(tops) => {
            state.docs_scrolled(&tops);
            Vec::new()
        }
        Msg::DocsNavClicked(id) => state.docs_nav_clicked(&id).into_iter().collect(),
        Msg::ContactSubmitted(form) => {
            if form.is_complete() {
                state.set_contact_sent(true);
                vec![Effect::OpenMailto {
                    link: mailto_link(recipient, &form),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ContactReset => {
            state.set_contact_sent(false);
            Vec::new()
        }
        Msg::ServerStatusChanged(status) => {
            state.set_server_status(status);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
