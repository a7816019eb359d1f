use std::path::PathBuf;

use ragdemo_core::{AccessLevel, ContactForm, Msg, SelectedFile};
use thiserror::Error;

/// One line of user input, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    SelectFile(PathBuf),
    Owner(String),
    Access(AccessLevel),
    Upload,
    Docs,
    /// Scroll the docs viewport by this many lines (negative is up).
    Scroll(i64),
    Goto(String),
    Contact(ContactForm),
    Visualization,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command /{0}; try /help")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("access level must be `private` or `common`")]
    AccessLevel,
}

pub const HELP: &[&str] = &[
    "<text>                          ask the assistant",
    "/file <path>                    select a document to ingest",
    "/owner <id>                     owner id for private documents",
    "/access <private|common>        visibility of the next upload",
    "/upload                         ingest the selected document",
    "/docs                           show the documentation page",
    "/scroll <lines>                 scroll the documentation (negative is up)",
    "/goto <section>                 jump to a documentation section",
    "/contact <name> | <email> | <message>",
    "/viz                            show the last retrieval visualization",
    "/help                           this text",
    "/quit                           exit",
];

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Ok(Command::Chat(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "file" => non_empty(arg, "/file <path>").map(|path| Command::SelectFile(PathBuf::from(path))),
        "owner" => non_empty(arg, "/owner <id>").map(|id| Command::Owner(id.to_string())),
        "access" => AccessLevel::parse(arg)
            .map(Command::Access)
            .ok_or(ParseError::AccessLevel),
        "upload" => Ok(Command::Upload),
        "docs" => Ok(Command::Docs),
        "scroll" => arg
            .parse::<i64>()
            .map(Command::Scroll)
            .map_err(|_| ParseError::Usage("/scroll <lines>")),
        "goto" => non_empty(arg, "/goto <section>").map(|id| Command::Goto(id.to_string())),
        "contact" => parse_contact(arg),
        "viz" => Ok(Command::Visualization),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

impl Command {
    /// Core messages for commands that act on the page state. Shell-only
    /// commands yield nothing.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Chat(text) => vec![Msg::ChatInputChanged(text), Msg::ChatSubmitted],
            Command::SelectFile(path) => vec![Msg::FileSelected(SelectedFile::from_path(path))],
            Command::Owner(id) => vec![Msg::OwnerIdChanged(id)],
            Command::Access(level) => vec![Msg::AccessLevelChanged(level)],
            Command::Upload => vec![Msg::UploadClicked],
            Command::Goto(id) => vec![Msg::DocsNavClicked(id)],
            Command::Contact(form) => vec![Msg::ContactReset, Msg::ContactSubmitted(form)],
            Command::Docs
            | Command::Scroll(_)
            | Command::Visualization
            | Command::Help
            | Command::Quit => Vec::new(),
        }
    }

    /// Commands that need the backend; refused while in maintenance.
    pub fn needs_server(&self) -> bool {
        matches!(self, Command::Chat(_) | Command::Upload)
    }
}

fn non_empty<'a>(arg: &'a str, usage: &'static str) -> Result<&'a str, ParseError> {
    if arg.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(arg)
    }
}

fn parse_contact(arg: &str) -> Result<Command, ParseError> {
    const USAGE: &str = "/contact <name> | <email> | <message>";
    let mut parts = arg.splitn(3, '|').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(email), Some(message))
            if !name.is_empty() && !email.is_empty() && !message.is_empty() =>
        {
            Ok(Command::Contact(ContactForm {
                name: name.to_string(),
                email: email.to_string(),
                message: message.to_string(),
            }))
        }
        _ => Err(ParseError::Usage(USAGE)),
    }
}
