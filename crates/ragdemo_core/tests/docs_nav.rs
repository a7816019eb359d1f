use ragdemo_core::{
    find_section, update, AppState, Effect, Msg, SectionTop, TriggerBand, DOC_SECTIONS,
};

/// Lays the catalogue out in 400px blocks starting `scroll` pixels above the viewport.
fn tops_at(scroll: f64) -> Vec<SectionTop> {
    DOC_SECTIONS
        .iter()
        .enumerate()
        .map(|(index, section)| SectionTop::new(section.id, index as f64 * 400.0 - scroll))
        .collect()
}

fn index_of(id: &str) -> usize {
    DOC_SECTIONS
        .iter()
        .position(|section| section.id == id)
        .expect("known section")
}

#[test]
fn catalogue_contains_installation_and_troubleshooting() {
    assert!(find_section("installation").is_some());
    assert!(find_section("troubleshooting").is_some());
    assert!(find_section("nope").is_none());
    assert_eq!(AppState::new().view().docs.active, DOC_SECTIONS[0].id);
}

#[test]
fn scrolling_troubleshooting_into_band_activates_it() {
    let scroll = index_of("troubleshooting") as f64 * 400.0 - 40.0;
    let (state, effects) = update(AppState::new(), Msg::DocsScrolled(tops_at(scroll)));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.docs.active, "troubleshooting");
    let active: Vec<_> = view
        .docs
        .entries
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(active, vec!["troubleshooting"]);
}

#[test]
fn first_section_in_band_wins() {
    // Two headings inside the band: catalogue order decides.
    let tops = vec![
        SectionTop::new("memory", 120.0),
        SectionTop::new("features", 10.0),
        SectionTop::new("architecture", -300.0),
    ];
    let (state, _) = update(AppState::new(), Msg::DocsScrolled(tops));
    assert_eq!(state.view().docs.active, "features");
}

#[test]
fn no_section_in_band_keeps_previous() {
    let (state, _) = update(AppState::new(), Msg::DocsNavClicked("api".to_string()));
    let (mut state, _) = update(
        state,
        Msg::DocsScrolled(vec![SectionTop::new("api", -20.0), SectionTop::new("integration", 300.0)]),
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().docs.active, "api");
}

#[test]
fn clicking_nav_entry_activates_immediately() {
    // Viewport parked on troubleshooting.
    let scroll = index_of("troubleshooting") as f64 * 400.0;
    let (state, _) = update(AppState::new(), Msg::DocsScrolled(tops_at(scroll)));

    let (state, effects) = update(state, Msg::DocsNavClicked("installation".to_string()));
    assert_eq!(state.view().docs.active, "installation");
    assert_eq!(
        effects,
        vec![Effect::ScrollToSection {
            section_id: "installation".to_string(),
            smooth: true,
        }]
    );

    // The next scroll event takes over again.
    let (state, _) = update(state, Msg::DocsScrolled(tops_at(scroll)));
    assert_eq!(state.view().docs.active, "troubleshooting");
}

#[test]
fn unknown_nav_entry_is_ignored() {
    let (mut state, effects) = update(AppState::new(), Msg::DocsNavClicked("blog".to_string()));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn custom_band_is_inclusive() {
    let state = AppState::new().with_trigger_band(TriggerBand {
        top: 50.0,
        bottom: 60.0,
    });
    let (state, _) = update(
        state,
        Msg::DocsScrolled(vec![
            SectionTop::new("intro", 10.0),
            SectionTop::new("installation", 60.0),
        ]),
    );
    assert_eq!(state.view().docs.active, "installation");
}
