/// Reachability of the RAG backend as last reported by the health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerStatus {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ServerStatus {
    pub fn label(self) -> &'static str {
        match self {
            ServerStatus::Unknown => "Checking",
            ServerStatus::Online => "Online & Ready",
            ServerStatus::Offline => "Offline",
        }
    }
}
