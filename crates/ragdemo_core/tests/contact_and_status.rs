use ragdemo_core::{
    encode_uri_component, mailto_link, update, update_with_recipient, AppState, ContactForm,
    Effect, Msg, ServerStatus,
};

fn form() -> ContactForm {
    ContactForm {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hi there & thanks".to_string(),
    }
}

#[test]
fn encodes_like_uri_component() {
    assert_eq!(encode_uri_component("a b+c&d"), "a%20b%2Bc%26d");
    assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
    assert_eq!(
        encode_uri_component("Hi! It's (really) ~me*"),
        "Hi!%20It's%20(really)%20~me*"
    );
}

#[test]
fn mailto_prefills_subject_and_body() {
    let link = mailto_link("team@example.com", &form());
    assert_eq!(
        link,
        "mailto:team@example.com?subject=Contact%20from%20Ada%20Lovelace\
         &body=Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0AHi%20there%20%26%20thanks"
    );
}

#[test]
fn contact_submit_emits_mailto_once_complete() {
    let (state, effects) = update_with_recipient(
        AppState::new(),
        Msg::ContactSubmitted(form()),
        "team@example.com",
    );
    assert_eq!(
        effects,
        vec![Effect::OpenMailto {
            link: mailto_link("team@example.com", &form()),
        }]
    );
    assert!(state.view().contact_sent);

    let (state, _) = update(state, Msg::Tick);
    assert!(state.view().contact_sent);
    let (state, _) = update(state, Msg::ContactReset);
    assert!(!state.view().contact_sent);
}

#[test]
fn incomplete_contact_form_is_ignored() {
    let incomplete = ContactForm {
        message: "  ".to_string(),
        ..form()
    };
    let (mut state, effects) = update(AppState::new(), Msg::ContactSubmitted(incomplete));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn offline_server_switches_to_maintenance() {
    let state = AppState::new();
    assert_eq!(state.view().server, ServerStatus::Unknown);
    assert!(!state.view().maintenance);

    let (mut state, _) = update(state, Msg::ServerStatusChanged(ServerStatus::Offline));
    assert!(state.view().maintenance);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ServerStatusChanged(ServerStatus::Offline));
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::ServerStatusChanged(ServerStatus::Online));
    assert!(!state.view().maintenance);
}
