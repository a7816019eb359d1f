use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use anyhow::Context;
use clap::Parser;
use rag_logging::{rag_debug, rag_info, rag_warn};
use ragdemo_core::{
    find_section, update_with_recipient, AppState, Msg, UploadStatus, DOC_SECTIONS,
};
use ragdemo_engine::EngineHandle;

use super::config::{self, AppConfig, Cli};
use super::effects::{self, EffectRunner};
use super::input::{parse_command, Command, ParseError};
use super::server_status::ServerStatusMonitor;
use super::ui::constants::{DOCS_VIEWPORT_LINES, PROMPT, TICK_INTERVAL};
use super::ui::layout::DocsViewport;
use super::ui::render::{self, Renderer};

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Core message produced off the main thread (engine completions).
    Msg(Msg),
    Command(Command),
    InvalidInput(ParseError),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli).context("loading configuration")?;
    rag_logging::initialize(
        config.destination()?,
        config.level_filter()?,
        &config.log_file,
    );
    rag_info!(
        "ragdemo starting base_url={} user_id={}",
        config.base_url,
        config.user_id
    );

    let engine = EngineHandle::new(config.client_settings()).context("starting engine")?;
    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone()).context("starting input reader")?;
    effects::spawn_event_pump(engine.clone(), tx).context("starting event pump")?;
    let monitor = ServerStatusMonitor::start(&engine, config.health_interval());

    let mut app = App::new(&config, engine);
    let mut stdout = io::stdout();
    print_lines(&mut stdout, &app.greeting())?;

    loop {
        let event = match rx.recv_timeout(TICK_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => AppEvent::Msg(Msg::Tick),
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let lines = match event {
            AppEvent::Msg(msg) => app.dispatch(msg),
            AppEvent::Command(command) => match app.handle_command(command) {
                Some(lines) => lines,
                None => break,
            },
            AppEvent::InvalidInput(err) => vec![err.to_string()],
            AppEvent::InputClosed => break,
        };
        print_lines(&mut stdout, &lines)?;
    }

    monitor.shutdown();
    rag_info!("ragdemo exiting");
    Ok(())
}

struct App {
    state: AppState,
    recipient: String,
    runner: EffectRunner,
    renderer: Renderer,
}

impl App {
    fn new(config: &AppConfig, engine: EngineHandle) -> Self {
        let session = config.chat_session();
        rag_info!("Chat session {}", session.session_id);
        Self {
            state: AppState::with_session(session),
            recipient: config.contact_recipient.clone(),
            runner: EffectRunner::new(engine, DocsViewport::new(DOC_SECTIONS, DOCS_VIEWPORT_LINES)),
            renderer: Renderer::default(),
        }
    }

    fn greeting(&mut self) -> Vec<String> {
        let mut lines = vec![
            "RAG demo: chat with your documents. /help lists commands.".to_string(),
            format!("Session {}", self.state.session().session_id),
        ];
        lines.extend(self.renderer.render(&self.state.view()));
        lines
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<String> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update_with_recipient(state, msg, &self.recipient);
        let mut out = if state.consume_dirty() {
            self.renderer.render(&state.view())
        } else {
            Vec::new()
        };
        self.state = state;
        out.extend(self.runner.run(effects));
        out
    }

    /// Returns `None` when the user asked to quit.
    fn handle_command(&mut self, command: Command) -> Option<Vec<String>> {
        let view = self.state.view();
        if view.maintenance && command.needs_server() {
            return Some(vec![
                "The service is unavailable; try again once it is back online.".to_string(),
            ]);
        }

        let lines = match command {
            Command::Quit => return None,
            Command::Help => render::help_lines(),
            Command::Docs => render::docs_page(&view.docs, &self.runner.viewport),
            Command::Visualization => self.runner.visualization.summary_lines(),
            Command::Scroll(delta) => {
                let tops = self.runner.viewport.scroll_by(delta);
                let mut out = self.dispatch(Msg::DocsScrolled(tops));
                out.extend(render::docs_page(&self.state.view().docs, &self.runner.viewport));
                out
            }
            Command::Goto(id) if find_section(&id).is_none() => {
                vec![format!("No section named {id:?}; /docs lists them.")]
            }
            Command::Goto(id) => {
                let mut out = self.dispatch(Msg::DocsNavClicked(id));
                out.extend(render::docs_page(&self.state.view().docs, &self.runner.viewport));
                out
            }
            Command::Chat(_) if view.chat.loading => {
                vec!["Still waiting for the previous answer.".to_string()]
            }
            Command::Upload if view.ingest.status == UploadStatus::Uploading => {
                vec!["An upload is already in progress.".to_string()]
            }
            Command::Upload if view.ingest.file_name.is_none() => {
                vec!["Select a file first with /file <path>.".to_string()]
            }
            Command::SelectFile(ref path) if !path.is_file() => {
                rag_warn!("Selected path is not a file: {}", path.display());
                vec![format!("{} is not a readable file.", path.display())]
            }
            other => {
                rag_debug!("Command {:?}", other);
                other
                    .into_msgs()
                    .into_iter()
                    .flat_map(|msg| self.dispatch(msg))
                    .collect()
            }
        };
        Some(lines)
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("ragdemo-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let event = match parse_command(&line) {
                    Ok(command) => AppEvent::Command(command),
                    Err(err) => AppEvent::InvalidInput(err),
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    write!(out, "{PROMPT}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdemo_core::{ChatRole, ServerStatus};

    fn app() -> App {
        let config = AppConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            session_id: Some("sess_test".to_string()),
            ..AppConfig::default()
        };
        let engine = EngineHandle::new(config.client_settings()).unwrap();
        App::new(&config, engine)
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut app = app();
        assert!(app.handle_command(Command::Quit).is_none());
        assert!(app.handle_command(Command::Help).is_some());
    }

    #[test]
    fn maintenance_blocks_chat_but_not_docs() {
        let mut app = app();
        app.dispatch(Msg::ServerStatusChanged(ServerStatus::Offline));

        let lines = app
            .handle_command(Command::Chat("hello".to_string()))
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert!(app.state.view().chat.messages.is_empty());

        let page = app.handle_command(Command::Docs).unwrap();
        assert!(page.len() > DOC_SECTIONS.len());
    }

    #[test]
    fn chat_command_records_user_message() {
        let mut app = app();
        let lines = app
            .handle_command(Command::Chat("what is RAG?".to_string()))
            .unwrap();
        assert!(lines.contains(&"you> what is RAG?".to_string()));

        let view = app.state.view();
        assert!(view.chat.loading);
        assert_eq!(view.chat.messages[0].role, ChatRole::User);

        let again = app
            .handle_command(Command::Chat("second".to_string()))
            .unwrap();
        assert_eq!(again, vec!["Still waiting for the previous answer.".to_string()]);
    }

    #[test]
    fn goto_activates_section_and_scrolls() {
        let mut app = app();
        let target = DOC_SECTIONS[3].id;
        app.handle_command(Command::Goto(target.to_string())).unwrap();
        assert_eq!(app.state.view().docs.active, target);
        assert!(app.runner.viewport.offset() > 0);

        let unknown = app
            .handle_command(Command::Goto("nowhere".to_string()))
            .unwrap();
        assert_eq!(unknown.len(), 1);
        assert_eq!(app.state.view().docs.active, target);
    }

    #[test]
    fn contact_builds_mailto_link() {
        let mut app = app();
        let lines = app
            .handle_command(Command::Contact(ragdemo_core::ContactForm {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "Hi".to_string(),
            }))
            .unwrap();
        assert!(lines
            .iter()
            .any(|line| line.starts_with("mailto:contact@example.com?subject=Contact%20from%20Ada")));
        assert!(app.state.view().contact_sent);
    }
}
