use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Effect, RequestId, DEFAULT_USER_ID};

pub const UPLOAD_FAILED_TEXT: &str = "Upload failed";
pub const UPLOAD_NETWORK_ERROR_TEXT: &str = "Network error or server unavailable.";

/// Visibility tag attached to an ingested document. Interpreted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    #[default]
    Private,
    Common,
}

impl AccessLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::Common => "common",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" => Some(AccessLevel::Private),
            "common" => Some(AccessLevel::Common),
            _ => None,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked by the user; bytes are read by the engine at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

/// How an upload request ended, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Envelope carried `code == 200`.
    Ingested { chunks_count: Option<u64> },
    /// Envelope arrived with another code.
    Rejected { code: u32, message: Option<String> },
    /// Transport or local failure.
    Failed { reason: String },
}

/// Status banner contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    pub chunk_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestPanel {
    file: Option<SelectedFile>,
    owner_id: String,
    access_level: AccessLevel,
    status: UploadStatus,
    result: Option<UploadResult>,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
}

impl Default for IngestPanel {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID.to_string())
    }
}

impl IngestPanel {
    pub(crate) fn new(owner_id: String) -> Self {
        Self {
            file: None,
            owner_id,
            access_level: AccessLevel::default(),
            status: UploadStatus::Idle,
            result: None,
            in_flight: None,
            last_request_id: 0,
        }
    }

    pub(crate) fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub(crate) fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub(crate) fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    pub(crate) fn status(&self) -> UploadStatus {
        self.status
    }

    pub(crate) fn result(&self) -> Option<&UploadResult> {
        self.result.as_ref()
    }

    pub(crate) fn upload_enabled(&self) -> bool {
        self.file.is_some() && self.status != UploadStatus::Uploading
    }

    /// Picks a new file and returns the panel to `Idle`.
    ///
    /// The picker is locked while an upload is outstanding.
    pub(crate) fn select_file(&mut self, file: SelectedFile) -> bool {
        if self.status == UploadStatus::Uploading {
            return false;
        }
        self.file = Some(file);
        self.status = UploadStatus::Idle;
        self.result = None;
        true
    }

    pub(crate) fn set_owner_id(&mut self, owner_id: String) -> bool {
        if self.status == UploadStatus::Uploading || self.owner_id == owner_id {
            return false;
        }
        self.owner_id = owner_id;
        true
    }

    pub(crate) fn set_access_level(&mut self, access_level: AccessLevel) -> bool {
        if self.status == UploadStatus::Uploading || self.access_level == access_level {
            return false;
        }
        self.access_level = access_level;
        true
    }

    pub(crate) fn start_upload(&mut self) -> Option<Effect> {
        if !self.upload_enabled() {
            return None;
        }
        let file = self.file.clone()?;

        self.status = UploadStatus::Uploading;
        self.result = None;
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(request_id);

        Some(Effect::UploadDocument {
            request_id,
            file,
            owner_id: self.owner_id.clone(),
            access_level: self.access_level,
        })
    }

    pub(crate) fn resolve(&mut self, request_id: RequestId, outcome: UploadOutcome) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;

        let file_name = self
            .file
            .as_ref()
            .map(|file| file.name.as_str())
            .unwrap_or("document");

        let result = match outcome {
            UploadOutcome::Ingested { chunks_count } => {
                let message = match chunks_count {
                    Some(count) => {
                        format!("Successfully ingested {file_name}. {count} chunks created.")
                    }
                    None => format!("Successfully ingested {file_name}."),
                };
                UploadResult {
                    success: true,
                    message,
                    chunk_count: chunks_count,
                }
            }
            UploadOutcome::Rejected { message, .. } => UploadResult {
                success: false,
                message: message
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| UPLOAD_FAILED_TEXT.to_string()),
                chunk_count: None,
            },
            UploadOutcome::Failed { .. } => UploadResult {
                success: false,
                message: UPLOAD_NETWORK_ERROR_TEXT.to_string(),
                chunk_count: None,
            },
        };

        self.status = if result.success {
            UploadStatus::Success
        } else {
            UploadStatus::Error
        };
        self.result = Some(result);
        true
    }
}
