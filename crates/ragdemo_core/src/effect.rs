use crate::{AccessLevel, ChatOptions, RequestId, SelectedFile, Visualization};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendChat {
        request_id: RequestId,
        query: String,
        session_id: String,
        user_id: String,
        options: ChatOptions,
    },
    UploadDocument {
        request_id: RequestId,
        file: SelectedFile,
        owner_id: String,
        access_level: AccessLevel,
    },
    /// Hand a chat answer's visualization payload to the visualization view.
    ForwardVisualization(Visualization),
    ScrollToSection {
        section_id: String,
        smooth: bool,
    },
    OpenMailto {
        link: String,
    },
}
