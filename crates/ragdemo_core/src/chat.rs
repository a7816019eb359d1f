use crate::{Effect, Visualization};

/// Identifier correlating an outgoing request with its completion.
pub type RequestId = u64;

pub const DEFAULT_USER_ID: &str = "user_123";
pub const CHAT_REJECTED_TEXT: &str = "Failed to get response.";
pub const CHAT_NETWORK_ERROR_TEXT: &str = "Network error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    Error,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Optional generation overrides sent with every chat request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatOptions {
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
}

/// Identity attached to every chat request for the lifetime of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub session_id: String,
    pub user_id: String,
    pub options: ChatOptions,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            session_id: String::new(),
            user_id: DEFAULT_USER_ID.to_string(),
            options: ChatOptions::default(),
        }
    }
}

/// How a chat request ended, as reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// Envelope carried `http_code == 200`.
    Answered {
        answer: String,
        visualization: Option<Visualization>,
    },
    /// Envelope arrived but reported another code.
    Rejected { http_code: u16 },
    /// The request never produced a usable envelope.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ChatPanel {
    session: ChatSession,
    draft: String,
    log: Vec<ChatMessage>,
    loading: bool,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
}

impl ChatPanel {
    pub(crate) fn new(session: ChatSession) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn messages(&self) -> &[ChatMessage] {
        &self.log
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn session(&self) -> &ChatSession {
        &self.session
    }

    pub(crate) fn send_enabled(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    /// Returns `false` when the draft is unchanged.
    pub(crate) fn set_draft(&mut self, text: String) -> bool {
        if self.draft == text {
            return false;
        }
        self.draft = text;
        true
    }

    /// Moves the draft into the log and produces the request effect.
    ///
    /// Mirrors the disabled send control: nothing happens for a blank draft
    /// or while a request is outstanding.
    pub(crate) fn submit(&mut self) -> Option<Effect> {
        if !self.send_enabled() {
            return None;
        }

        let query = std::mem::take(&mut self.draft);
        self.log.push(ChatMessage::new(ChatRole::User, query.clone()));
        self.loading = true;
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(request_id);

        Some(Effect::SendChat {
            request_id,
            query,
            session_id: self.session.session_id.clone(),
            user_id: self.session.user_id.clone(),
            options: self.session.options.clone(),
        })
    }

    /// Applies a completion. Returns `None` when it does not belong to the
    /// outstanding request.
    pub(crate) fn resolve(
        &mut self,
        request_id: RequestId,
        outcome: ChatOutcome,
    ) -> Option<Vec<Effect>> {
        if self.in_flight != Some(request_id) {
            return None;
        }
        self.in_flight = None;
        self.loading = false;

        let mut effects = Vec::new();
        match outcome {
            ChatOutcome::Answered {
                answer,
                visualization,
            } => {
                self.log.push(ChatMessage::new(ChatRole::Assistant, answer));
                if let Some(visualization) = visualization {
                    effects.push(Effect::ForwardVisualization(visualization));
                }
            }
            ChatOutcome::Rejected { .. } => {
                self.log
                    .push(ChatMessage::new(ChatRole::Error, CHAT_REJECTED_TEXT));
            }
            ChatOutcome::Failed { .. } => {
                self.log
                    .push(ChatMessage::new(ChatRole::Error, CHAT_NETWORK_ERROR_TEXT));
            }
        }
        Some(effects)
    }
}
