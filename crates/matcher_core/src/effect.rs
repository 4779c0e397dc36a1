use crate::{FileHandle, Notice, RequestId};

/// Side effects requested by `update`; executed by the engine or the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    UploadSingle {
        request_id: RequestId,
        file: FileHandle,
    },
    UploadBatch {
        request_id: RequestId,
        files: Vec<FileHandle>,
    },
    Match {
        request_id: RequestId,
        text: String,
        top_k: u32,
    },
    /// One-shot notice for the user. Never stored in state.
    Notify(Notice),
}

impl Effect {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Effect::UploadSingle { request_id, .. }
            | Effect::UploadBatch { request_id, .. }
            | Effect::Match { request_id, .. } => Some(*request_id),
            Effect::Notify(_) => None,
        }
    }
}
