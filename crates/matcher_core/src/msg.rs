use crate::{FileHandle, MatchResult, OpKind, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a new set of files; replaces the previous selection.
    FilesSelected(Vec<FileHandle>),
    /// User edited the job-description text.
    JobDescriptionChanged(String),
    /// User asked to upload the first selected file.
    UploadSingleClicked,
    /// User asked to upload every selected file.
    UploadBatchClicked,
    /// User asked to match the current job description.
    MatchClicked { top_k: u32 },
    /// An upload request settled.
    UploadFinished {
        request_id: RequestId,
        op: OpKind,
        outcome: UploadOutcome,
    },
    /// A match request settled.
    MatchFinished {
        request_id: RequestId,
        outcome: MatchOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { message: Option<String> },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Server ranking, best first. May be empty.
    Matches(Vec<MatchResult>),
    Failed { reason: String },
}
