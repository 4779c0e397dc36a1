use std::fmt;

use crate::OpKind;

/// Broad class of a notice, used by the presentation layer for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    Validation,
    Transport,
    EmptyResult,
    Success,
}

/// Ephemeral, user-visible outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Upload requested with nothing selected.
    NoFileSelected { op: OpKind },
    /// Match requested with empty or whitespace-only text.
    EmptyJobDescription,
    /// Upload accepted; `message` is the server's text or the default for `op`.
    Uploaded { op: OpKind, message: String },
    UploadFailed,
    /// Match call succeeded but returned no resumes.
    NoMatches,
    MatchFailed,
}

impl Notice {
    pub fn category(&self) -> NoticeCategory {
        match self {
            Notice::NoFileSelected { .. } | Notice::EmptyJobDescription => {
                NoticeCategory::Validation
            }
            Notice::UploadFailed | Notice::MatchFailed => NoticeCategory::Transport,
            Notice::NoMatches => NoticeCategory::EmptyResult,
            Notice::Uploaded { .. } => NoticeCategory::Success,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::NoFileSelected {
                op: OpKind::UploadBatch,
            } => "Select resumes first",
            Notice::NoFileSelected { .. } => "Select a resume first",
            Notice::EmptyJobDescription => "Paste a Job Description",
            Notice::Uploaded { message, .. } => message,
            Notice::UploadFailed => "Upload failed",
            Notice::NoMatches => "No resumes found. Upload resumes first.",
            Notice::MatchFailed => "Matching failed",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
